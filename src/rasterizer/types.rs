//! Core types for the rasterizer

use super::render::RenderError;
use super::MAX_CANVAS_SIZE;

/// RGBA color (0-255 per channel, straight alpha)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Linear interpolation between two colors (t clamped to 0.0-1.0)
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// Composite `self` over `dst` (source-over), with `self` scaled by `coverage`
    pub fn over(self, dst: Color, coverage: f32) -> Color {
        let sa = (self.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return dst;
        }
        let da = dst.a as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return Color::TRANSPARENT;
        }

        let channel = |s: u8, d: u8| {
            let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };

        Color {
            r: channel(self.r, dst.r),
            g: channel(self.g, dst.g),
            b: channel(self.b, dst.b),
            a: (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        }
    }

    /// Convert to [u8; 4] for the pixel buffer
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// RGBA pixel grid, 4 bytes per pixel, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub pixels: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl PixelBuffer {
    /// Allocate a fully transparent buffer.
    ///
    /// Zero-sized and oversized canvases are rejected here so every drawing
    /// routine can assume a valid grid.
    pub fn new(width: usize, height: usize) -> Result<Self, RenderError> {
        if width == 0 || height == 0 || width > MAX_CANVAS_SIZE || height > MAX_CANVAS_SIZE {
            return Err(RenderError::InvalidSize { width, height });
        }
        Ok(Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        })
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            Color::with_alpha(
                self.pixels[idx],
                self.pixels[idx + 1],
                self.pixels[idx + 2],
                self.pixels[idx + 3],
            )
        } else {
            Color::TRANSPARENT
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    /// Composite a color onto one pixel with fractional coverage
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: Color, coverage: f32) {
        if coverage <= 0.0 || x >= self.width || y >= self.height {
            return;
        }
        let dst = self.get_pixel(x, y);
        self.set_pixel(x, y, color.over(dst, coverage));
    }

    /// Overwrite an integer rectangle (clipped to the buffer)
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Color) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for py in y..y_end {
            for px in x..x_end {
                self.set_pixel(px, py, color);
            }
        }
    }

    /// Punch a fully transparent rectangle (canvas `clearRect`)
    pub fn clear_rect(&mut self, x: usize, y: usize, w: usize, h: usize) {
        self.fill_rect(x, y, w, h, Color::TRANSPARENT);
    }

    /// Iterate over every pixel as (x, y, color)
    #[cfg(test)]
    pub fn iter_pixels(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        let width = self.width;
        self.pixels.chunks_exact(4).enumerate().map(move |(i, p)| {
            (i % width, i / width, Color::with_alpha(p[0], p[1], p[2], p[3]))
        })
    }
}
