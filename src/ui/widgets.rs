//! Basic UI widgets

use macroquad::prelude::*;
use super::{Rect, UiContext, draw_icon_centered};

/// Accent color (cyan)
pub const ACCENT_COLOR: Color = Color::new(0.0, 0.75, 0.9, 1.0);

/// Text color for labels and values
pub const LABEL_COLOR: Color = Color::new(0.8, 0.8, 0.82, 1.0);

/// Muted text color (captions, hints)
pub const MUTED_COLOR: Color = Color::new(0.55, 0.55, 0.6, 1.0);

// =============================================================================
// Buttons
// =============================================================================

/// Draw a flat icon button, returns true if clicked.
/// Without an icon font the `fallback` text is drawn instead.
pub fn icon_button(
    ctx: &mut UiContext,
    rect: Rect,
    icon: char,
    fallback: &str,
    icon_font: Option<&Font>,
    tooltip: &str,
) -> bool {
    let id = ctx.next_id();
    let hovered = ctx.mouse.inside(&rect);
    let pressed = ctx.mouse.clicking(&rect);
    let clicked = ctx.mouse.clicked(&rect);

    if hovered {
        ctx.set_hot(id);
        if !tooltip.is_empty() {
            ctx.set_tooltip(tooltip, ctx.mouse.x, ctx.mouse.y);
        }
    }

    if pressed {
        draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 4.0, Color::from_rgba(60, 60, 70, 255));
    } else if hovered {
        draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 4.0, Color::from_rgba(50, 50, 60, 255));
    }

    let color = if hovered {
        Color::from_rgba(220, 220, 220, 255)
    } else {
        Color::from_rgba(180, 180, 180, 255)
    };

    match icon_font {
        Some(_) => {
            let icon_size = (rect.h * 0.55).min(16.0);
            draw_icon_centered(icon_font, icon, &rect, icon_size, color);
        }
        None => draw_centered_text(fallback, &rect, 16.0, color),
    }

    clicked
}

/// Draw a bordered text button, returns true if clicked
pub fn text_button(ctx: &mut UiContext, rect: Rect, label: &str, tooltip: &str) -> bool {
    let id = ctx.next_id();
    let hovered = ctx.mouse.inside(&rect);
    let pressed = ctx.mouse.clicking(&rect);
    let clicked = ctx.mouse.clicked(&rect);

    if hovered {
        ctx.set_hot(id);
        if !tooltip.is_empty() {
            ctx.set_tooltip(tooltip, ctx.mouse.x, ctx.mouse.y);
        }
    }

    let bg = if pressed {
        Color::from_rgba(0, 120, 145, 255)
    } else if hovered {
        Color::from_rgba(50, 50, 60, 255)
    } else {
        Color::from_rgba(38, 38, 45, 255)
    };
    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 4.0, bg);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, ACCENT_COLOR);
    draw_centered_text(label, &rect, 14.0, ACCENT_COLOR);

    clicked
}

/// Draw an exclusive toggle group (one option always selected).
/// Returns the index of a newly selected option.
pub fn draw_toggle_group(ctx: &mut UiContext, rect: Rect, labels: &[&str], selected: usize) -> Option<usize> {
    if labels.is_empty() {
        return None;
    }
    let seg_w = (rect.w / labels.len() as f32).floor();
    let mut choice = None;

    for (i, label) in labels.iter().enumerate() {
        let id = ctx.next_id();
        let seg = Rect::new(rect.x + seg_w * i as f32, rect.y, seg_w, rect.h);
        let hovered = ctx.mouse.inside(&seg);
        let is_selected = i == selected;

        if hovered {
            ctx.set_hot(id);
        }

        let bg = if is_selected {
            Color::new(0.0, 0.75, 0.9, 0.25)
        } else if hovered {
            Color::from_rgba(50, 50, 60, 255)
        } else {
            Color::from_rgba(32, 32, 38, 255)
        };
        draw_rectangle(seg.x, seg.y, seg.w, seg.h, bg);
        draw_rectangle_lines(seg.x, seg.y, seg.w, seg.h, 1.0, Color::from_rgba(70, 70, 80, 255));

        let text_color = if is_selected { ACCENT_COLOR } else { LABEL_COLOR };
        draw_centered_text(label, &seg, 13.0, text_color);

        if ctx.mouse.clicked(&seg) && !is_selected {
            choice = Some(i);
        }
    }

    choice
}

// =============================================================================
// Slider Widget
// =============================================================================

/// Draw a horizontal slider.
///
/// - `fraction`: current position in 0.0-1.0
/// - `marks`: positions (0.0-1.0) to draw tick marks at
///
/// Returns the new position while the handle is pressed or dragged. The
/// caller snaps it to the field's granularity.
pub fn draw_slider(ctx: &mut UiContext, rect: Rect, fraction: f32, marks: &[f32]) -> Option<f32> {
    let id = ctx.next_id();
    let hovered = ctx.mouse.inside(&rect);

    if hovered {
        ctx.set_hot(id);
        if ctx.mouse.left_pressed {
            ctx.start_drag(id);
        }
    }

    let track_h = 4.0;
    let track_y = (rect.center_y() - track_h * 0.5).round();
    let handle_r = 7.0;
    // Inset so the handle never overhangs the rect
    let track_x = rect.x + handle_r;
    let track_w = (rect.w - handle_r * 2.0).max(1.0);

    let fraction = fraction.clamp(0.0, 1.0);
    let handle_x = track_x + fraction * track_w;

    draw_rectangle(track_x, track_y, track_w, track_h, Color::from_rgba(60, 60, 70, 255));
    draw_rectangle(track_x, track_y, handle_x - track_x, track_h, ACCENT_COLOR);

    for mark in marks {
        let mx = (track_x + mark.clamp(0.0, 1.0) * track_w).round();
        draw_rectangle(mx - 1.0, track_y - 3.0, 2.0, track_h + 6.0, Color::from_rgba(120, 120, 130, 255));
    }

    let handle_color = if ctx.is_dragging(id) || ctx.is_hot(id) {
        WHITE
    } else {
        Color::from_rgba(200, 230, 240, 255)
    };
    draw_circle(handle_x, rect.center_y(), handle_r, handle_color);
    draw_circle(handle_x, rect.center_y(), handle_r - 3.0, ACCENT_COLOR);

    if ctx.is_dragging(id) {
        Some(((ctx.mouse.x - track_x) / track_w).clamp(0.0, 1.0))
    } else {
        None
    }
}

// =============================================================================
// Drawing helpers
// =============================================================================

/// Fill a rect with a two-color checkerboard (transparency backdrop).
/// Tiles are anchored at the rect's top-left and clipped at its edges.
pub fn draw_checkerboard(rect: Rect, tile: f32, light: Color, dark: Color) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, light);

    let cols = (rect.w / tile).ceil() as usize;
    let rows = (rect.h / tile).ceil() as usize;
    for row in 0..rows {
        for col in 0..cols {
            if (row + col) % 2 == 0 {
                continue;
            }
            let x = rect.x + col as f32 * tile;
            let y = rect.y + row as f32 * tile;
            let w = tile.min(rect.right() - x);
            let h = tile.min(rect.bottom() - y);
            draw_rectangle(x, y, w, h, dark);
        }
    }
}

/// Draw text centered in a rect
pub fn draw_centered_text(text: &str, rect: &Rect, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    let x = (rect.center_x() - dims.width * 0.5).round();
    let y = (rect.center_y() + dims.offset_y * 0.5).round();
    draw_text(text, x, y, font_size, color);
}

/// Draw a rounded rectangle (simple approximation using overlapping rects)
pub fn draw_rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32, color: Color) {
    draw_rectangle(x + r, y, w - r * 2.0, h, color);
    draw_rectangle(x, y + r, w, h - r * 2.0, color);
    draw_circle(x + r, y + r, r, color);
    draw_circle(x + w - r, y + r, r, color);
    draw_circle(x + r, y + h - r, r, color);
    draw_circle(x + w - r, y + h - r, r, color);
}
