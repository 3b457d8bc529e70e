//! Lucide icon support
//!
//! Uses the Lucide icon font for crisp vector icons at any size. The font is
//! optional; without it buttons fall back to their text labels.

use macroquad::prelude::*;

/// Path of the icon font, relative to the working directory
pub const ICON_FONT_PATH: &str = "assets/fonts/lucide.ttf";

/// Lucide icon codepoints
pub mod icon {
    pub const FOLDER_OPEN: char = '\u{e247}';
    pub const PLUS: char = '\u{e13d}';
    pub const MINUS: char = '\u{e11c}';
}

/// Draw a Lucide icon centered in a rect
pub fn draw_icon_centered(font: Option<&Font>, icon: char, rect: &super::Rect, size: f32, color: Color) {
    let text = icon.to_string();

    // Icon glyphs are roughly square, font size wide and tall; baseline is at the bottom
    let x = rect.x + (rect.w - size) * 0.5;
    let y = rect.y + (rect.h + size) * 0.5;

    draw_text_ex(
        &text,
        x.round(),
        y.round(),
        TextParams {
            font,
            font_size: size as u16,
            color,
            ..Default::default()
        },
    );
}
