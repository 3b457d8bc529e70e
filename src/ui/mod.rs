//! Immediate-mode UI toolkit
//!
//! Widgets are drawn every frame with macroquad and report changes through
//! return values. `Rect` math is plain f32 so it can be tested headless.

mod icons;
mod input;
mod tabbar;
mod widgets;

pub use icons::*;
pub use input::*;
pub use tabbar::*;
pub use widgets::*;

use macroquad::prelude::*;

/// Screen-space rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h * 0.5
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by `pad` on every side
    pub fn pad(&self, pad: f32) -> Self {
        Self::new(
            self.x + pad,
            self.y + pad,
            (self.w - pad * 2.0).max(0.0),
            (self.h - pad * 2.0).max(0.0),
        )
    }

    /// Top strip of height `h`
    pub fn slice_top(&self, h: f32) -> Self {
        Self::new(self.x, self.y, self.w, h.min(self.h))
    }

    /// Everything below a top strip of height `h`
    pub fn remaining_after_top(&self, h: f32) -> Self {
        let h = h.min(self.h);
        Self::new(self.x, self.y + h, self.w, self.h - h)
    }

    /// Bottom strip of height `h`
    pub fn slice_bottom(&self, h: f32) -> Self {
        let h = h.min(self.h);
        Self::new(self.x, self.bottom() - h, self.w, h)
    }

    /// Everything above a bottom strip of height `h`
    pub fn remaining_after_bottom(&self, h: f32) -> Self {
        Self::new(self.x, self.y, self.w, (self.h - h).max(0.0))
    }

    /// Largest rect with the given aspect ratio centered inside this one
    pub fn fit_aspect(&self, aspect: f32) -> Self {
        let (w, h) = if self.w / self.h.max(1.0) > aspect {
            (self.h * aspect, self.h)
        } else {
            (self.w, self.w / aspect)
        };
        Self::new(self.x + (self.w - w) * 0.5, self.y + (self.h - h) * 0.5, w, h)
    }

    /// Rect of size (w, h) centered inside this one
    pub fn centered(&self, w: f32, h: f32) -> Self {
        Self::new(self.x + (self.w - w) * 0.5, self.y + (self.h - h) * 0.5, w, h)
    }
}

/// Height of a panel's title strip
const PANEL_TITLE_HEIGHT: f32 = 22.0;

/// Draw a panel background with an optional title strip
pub fn draw_panel(rect: Rect, title: Option<&str>, bg: Color) {
    draw_rectangle(rect.x.floor(), rect.y.floor(), rect.w, rect.h, bg);
    draw_rectangle_lines(rect.x.floor(), rect.y.floor(), rect.w, rect.h, 1.0, Color::from_rgba(60, 60, 70, 255));

    if let Some(title) = title {
        let strip = rect.slice_top(PANEL_TITLE_HEIGHT);
        draw_rectangle(strip.x.floor(), strip.y.floor(), strip.w, strip.h, Color::from_rgba(45, 45, 52, 255));
        draw_text(
            title,
            (rect.x + 8.0).floor(),
            (rect.y + 15.0).floor(),
            14.0,
            Color::from_rgba(200, 200, 205, 255),
        );
    }
}

/// Area inside a panel, below the title strip when there is one
pub fn panel_content_rect(rect: Rect, has_title: bool) -> Rect {
    let top = if has_title { PANEL_TITLE_HEIGHT } else { 0.0 };
    rect.remaining_after_top(top).pad(6.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slices() {
        let r = Rect::new(0.0, 0.0, 100.0, 200.0);
        assert_eq!(r.slice_top(20.0), Rect::new(0.0, 0.0, 100.0, 20.0));
        assert_eq!(r.remaining_after_top(20.0), Rect::new(0.0, 20.0, 100.0, 180.0));
        assert_eq!(r.slice_bottom(30.0), Rect::new(0.0, 170.0, 100.0, 30.0));
        assert_eq!(r.remaining_after_bottom(30.0), Rect::new(0.0, 0.0, 100.0, 170.0));
    }

    #[test]
    fn test_fit_aspect() {
        let r = Rect::new(0.0, 0.0, 400.0, 400.0);
        let fitted = r.fit_aspect(16.0 / 9.0);
        assert_eq!(fitted.w, 400.0);
        assert_eq!(fitted.h, 225.0);
        assert_eq!(fitted.y, 87.5);
    }

    #[test]
    fn test_contains_half_open() {
        let r = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(r.contains(10.0, 10.0));
        assert!(!r.contains(20.0, 15.0));
    }
}
