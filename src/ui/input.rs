//! Input state for UI interaction

use super::Rect;
use macroquad::prelude::*;

/// Mouse button state for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub left_pressed: bool, // Just pressed this frame
}

impl MouseState {
    /// Sample macroquad's input, deriving press/release edges from last frame
    pub fn poll(last_left_down: bool) -> Self {
        let (x, y) = mouse_position();
        let left_down = is_mouse_button_down(MouseButton::Left);
        Self {
            x,
            y,
            left_down,
            left_pressed: left_down && !last_left_down,
        }
    }

    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Check if mouse is held down inside a rect
    pub fn clicking(&self, rect: &Rect) -> bool {
        self.left_down && rect.contains(self.x, self.y)
    }

    /// Check if mouse just clicked inside a rect
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && rect.contains(self.x, self.y)
    }
}

/// Pending tooltip to be drawn at end of frame
#[derive(Clone)]
pub struct PendingTooltip {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// UI context passed through the frame
pub struct UiContext {
    pub mouse: MouseState,
    /// ID of the widget currently being dragged (if any)
    pub dragging: Option<u64>,
    /// ID of the widget that is "hot" (mouse hovering)
    pub hot: Option<u64>,
    /// Counter for generating per-frame widget IDs
    id_counter: u64,
    /// Tooltip to show this frame (set by widgets, drawn at end)
    pub tooltip: Option<PendingTooltip>,
}

impl UiContext {
    pub fn new() -> Self {
        Self {
            mouse: MouseState::default(),
            dragging: None,
            hot: None,
            id_counter: 0,
            tooltip: None,
        }
    }

    /// Generate an ID for a widget; stable as long as draw order is stable
    pub fn next_id(&mut self) -> u64 {
        self.id_counter += 1;
        self.id_counter
    }

    /// Reset at start of frame (call before UI code)
    pub fn begin_frame(&mut self, mouse: MouseState) {
        self.mouse = mouse;
        self.hot = None;
        self.id_counter = 0;
        self.tooltip = None;

        // Clear dragging if mouse released
        if !self.mouse.left_down {
            self.dragging = None;
        }
    }

    /// Set tooltip to show (call from widget when hovered)
    pub fn set_tooltip(&mut self, text: &str, x: f32, y: f32) {
        self.tooltip = Some(PendingTooltip {
            text: text.to_string(),
            x,
            y,
        });
    }

    /// Draw the tooltip if one is pending (call at end of frame)
    pub fn draw_tooltip(&self) {
        if let Some(tip) = &self.tooltip {
            let padding = 6.0;
            let font_size = 13.0;
            let dims = measure_text(&tip.text, None, font_size as u16, 1.0);

            let box_w = dims.width + padding * 2.0;
            let box_h = dims.height + padding * 2.0;

            // Below and to the right of the cursor, kept on screen
            let mut x = tip.x + 12.0;
            let mut y = tip.y + 20.0;
            if x + box_w > screen_width() {
                x = screen_width() - box_w - 4.0;
            }
            if y + box_h > screen_height() {
                y = tip.y - box_h - 4.0;
            }

            draw_rectangle(x, y, box_w, box_h, Color::from_rgba(30, 30, 35, 240));
            draw_rectangle_lines(x, y, box_w, box_h, 1.0, Color::from_rgba(80, 80, 90, 255));
            draw_text(
                &tip.text,
                x + padding,
                y + padding + dims.height - 2.0,
                font_size,
                Color::from_rgba(220, 220, 220, 255),
            );
        }
    }

    /// Check if this widget is being dragged
    pub fn is_dragging(&self, id: u64) -> bool {
        self.dragging == Some(id)
    }

    /// Start dragging a widget
    pub fn start_drag(&mut self, id: u64) {
        self.dragging = Some(id);
    }

    /// Set hot widget (hovering)
    pub fn set_hot(&mut self, id: u64) {
        // Only set hot if not dragging something else
        if self.dragging.is_none() || self.dragging == Some(id) {
            self.hot = Some(id);
        }
    }

    /// Check if widget is hot
    pub fn is_hot(&self, id: u64) -> bool {
        self.hot == Some(id)
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_cleared_on_release() {
        let mut ctx = UiContext::new();
        ctx.begin_frame(MouseState { left_down: true, left_pressed: true, ..Default::default() });
        let id = ctx.next_id();
        ctx.start_drag(id);
        assert!(ctx.is_dragging(id));

        ctx.begin_frame(MouseState { left_down: true, ..Default::default() });
        assert!(ctx.is_dragging(id));

        ctx.begin_frame(MouseState::default());
        assert!(!ctx.is_dragging(id));
    }

    #[test]
    fn test_hot_blocked_while_dragging_other() {
        let mut ctx = UiContext::new();
        ctx.begin_frame(MouseState { left_down: true, ..Default::default() });
        ctx.start_drag(1);
        ctx.set_hot(2);
        assert!(!ctx.is_hot(2));
        ctx.set_hot(1);
        assert!(ctx.is_hot(1));
    }
}
