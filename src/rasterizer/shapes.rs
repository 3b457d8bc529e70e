//! Anti-aliased shape filling
//!
//! Rectangles use exact area coverage. Circles and rings classify each pixel
//! by its center distance and only supersample pixels straddling an edge.

use super::types::{Color, PixelBuffer};
use std::f32::consts::FRAC_1_SQRT_2;

/// Subsamples per axis for edge pixels (4x4 = 16 coverage levels)
const EDGE_SUBSAMPLES: usize = 4;

/// Axis-aligned rectangle in floating point canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl RectF {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Grow (or shrink, if negative) on every side
    pub fn inflate(&self, amount: f32) -> Self {
        Self::new(self.x - amount, self.y - amount, self.w + amount * 2.0, self.h + amount * 2.0)
    }

    /// Area of the overlap between this rect and the unit pixel at (px, py)
    pub fn pixel_coverage(&self, px: usize, py: usize) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let (px, py) = (px as f32, py as f32);
        let ox = (self.x + self.w).min(px + 1.0) - self.x.max(px);
        let oy = (self.y + self.h).min(py + 1.0) - self.y.max(py);
        if ox <= 0.0 || oy <= 0.0 {
            0.0
        } else {
            ox * oy
        }
    }

    /// Pixel index range touched by this rect, clipped to the buffer
    fn pixel_bounds(&self, fb: &PixelBuffer) -> (usize, usize, usize, usize) {
        let x0 = self.x.floor().max(0.0) as usize;
        let y0 = self.y.floor().max(0.0) as usize;
        let x1 = ((self.x + self.w).ceil().max(0.0) as usize).min(fb.width);
        let y1 = ((self.y + self.h).ceil().max(0.0) as usize).min(fb.height);
        (x0, y0, x1, y1)
    }
}

/// Stroke a rectangle path with the line centered on the path (miter joins).
///
/// The painted area is the outer rect minus the inner rect, both offset from
/// the path by half the line width.
pub fn stroke_rect(fb: &mut PixelBuffer, path: RectF, line_width: f32, color: Color) {
    if line_width <= 0.0 {
        return;
    }
    let outer = path.inflate(line_width * 0.5);
    let inner = path.inflate(-line_width * 0.5);

    let (x0, y0, x1, y1) = outer.pixel_bounds(fb);
    for py in y0..y1 {
        for px in x0..x1 {
            let coverage = outer.pixel_coverage(px, py) - inner.pixel_coverage(px, py);
            fb.blend_pixel(px, py, color, coverage);
        }
    }
}

/// Fraction of the unit pixel at (px, py) lying in the ring `inner <= d <= outer`
/// around (cx, cy). An `inner` of zero gives a filled disc.
pub fn ring_coverage(px: usize, py: usize, cx: f32, cy: f32, inner: f32, outer: f32) -> f32 {
    if outer <= 0.0 || outer <= inner {
        return 0.0;
    }
    let dx = px as f32 + 0.5 - cx;
    let dy = py as f32 + 0.5 - cy;
    let d = (dx * dx + dy * dy).sqrt();

    // Every point of the pixel lies within half a diagonal of its center
    let near = d - FRAC_1_SQRT_2;
    let far = d + FRAC_1_SQRT_2;
    if near >= outer || far <= inner {
        return 0.0;
    }
    if near >= inner && far <= outer {
        return 1.0;
    }

    let (inner_sq, outer_sq) = (inner * inner, outer * outer);
    let step = 1.0 / EDGE_SUBSAMPLES as f32;
    let mut hits = 0;
    for j in 0..EDGE_SUBSAMPLES {
        let sy = py as f32 + (j as f32 + 0.5) * step - cy;
        for i in 0..EDGE_SUBSAMPLES {
            let sx = px as f32 + (i as f32 + 0.5) * step - cx;
            let dist_sq = sx * sx + sy * sy;
            if dist_sq >= inner_sq && dist_sq <= outer_sq {
                hits += 1;
            }
        }
    }
    hits as f32 / (EDGE_SUBSAMPLES * EDGE_SUBSAMPLES) as f32
}

/// Pixel index range of the square bounding a circle, clipped to the buffer
fn circle_bounds(fb: &PixelBuffer, cx: f32, cy: f32, radius: f32) -> (usize, usize, usize, usize) {
    RectF::new(cx - radius, cy - radius, radius * 2.0, radius * 2.0).pixel_bounds(fb)
}

/// Fill a circle of the given radius centered at (cx, cy)
pub fn fill_circle(fb: &mut PixelBuffer, cx: f32, cy: f32, radius: f32, color: Color) {
    fill_ring(fb, cx, cy, 0.0, radius, color);
}

/// Stroke a circle path of `radius` with a centered line of `line_width`
pub fn stroke_circle(fb: &mut PixelBuffer, cx: f32, cy: f32, radius: f32, line_width: f32, color: Color) {
    if line_width <= 0.0 {
        return;
    }
    let half = line_width * 0.5;
    fill_ring(fb, cx, cy, (radius - half).max(0.0), radius + half, color);
}

fn fill_ring(fb: &mut PixelBuffer, cx: f32, cy: f32, inner: f32, outer: f32, color: Color) {
    if outer <= 0.0 {
        return;
    }
    let (x0, y0, x1, y1) = circle_bounds(fb, cx, cy, outer);
    for py in y0..y1 {
        for px in x0..x1 {
            let coverage = ring_coverage(px, py, cx, cy, inner, outer);
            fb.blend_pixel(px, py, color, coverage);
        }
    }
}

/// Radial gradient between two concentric circles sharing one center.
///
/// Color stops are offsets in 0.0-1.0 along the radius, evaluated at pixel
/// centers the way a canvas gradient fill style is.
#[derive(Debug, Clone)]
pub struct RadialGradient {
    pub cx: f32,
    pub cy: f32,
    pub r0: f32,
    pub r1: f32,
    stops: Vec<(f32, Color)>,
}

impl RadialGradient {
    pub fn new(cx: f32, cy: f32, r0: f32, r1: f32) -> Self {
        Self { cx, cy, r0, r1, stops: Vec::new() }
    }

    /// Add a color stop; stops are kept sorted by offset
    pub fn add_color_stop(&mut self, offset: f32, color: Color) {
        let offset = offset.clamp(0.0, 1.0);
        let idx = self.stops.partition_point(|(o, _)| *o <= offset);
        self.stops.insert(idx, (offset, color));
    }

    /// Color at gradient parameter `t` (0.0 at r0, 1.0 at r1)
    pub fn color_at(&self, t: f32) -> Color {
        let Some(&(first_offset, first)) = self.stops.first() else {
            return Color::TRANSPARENT;
        };
        if t <= first_offset {
            return first;
        }
        for pair in self.stops.windows(2) {
            let (o0, c0) = pair[0];
            let (o1, c1) = pair[1];
            if t <= o1 {
                let span = o1 - o0;
                return if span <= 0.0 { c1 } else { c0.lerp(c1, (t - o0) / span) };
            }
        }
        self.stops.last().map(|&(_, c)| c).unwrap_or(Color::TRANSPARENT)
    }

    /// Color at canvas point (x, y)
    pub fn sample(&self, x: f32, y: f32) -> Color {
        let span = self.r1 - self.r0;
        if span <= 0.0 {
            return Color::TRANSPARENT;
        }
        let d = ((x - self.cx).powi(2) + (y - self.cy).powi(2)).sqrt();
        self.color_at((d - self.r0) / span)
    }
}

/// Fill a disc with a radial gradient as the fill style
pub fn fill_circle_gradient(fb: &mut PixelBuffer, cx: f32, cy: f32, radius: f32, gradient: &RadialGradient) {
    if radius <= 0.0 {
        return;
    }
    let (x0, y0, x1, y1) = circle_bounds(fb, cx, cy, radius);
    for py in y0..y1 {
        for px in x0..x1 {
            let coverage = ring_coverage(px, py, cx, cy, 0.0, radius);
            if coverage > 0.0 {
                let color = gradient.sample(px as f32 + 0.5, py as f32 + 0.5);
                fb.blend_pixel(px, py, color, coverage);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_coverage_partial() {
        let r = RectF::new(0.5, 0.0, 2.0, 1.0);
        assert!((r.pixel_coverage(0, 0) - 0.5).abs() < 1e-6);
        assert!((r.pixel_coverage(1, 0) - 1.0).abs() < 1e-6);
        assert!((r.pixel_coverage(2, 0) - 0.5).abs() < 1e-6);
        assert_eq!(r.pixel_coverage(3, 0), 0.0);
    }

    #[test]
    fn test_ring_coverage_classification() {
        // Deep inside a disc of radius 10
        assert_eq!(ring_coverage(10, 10, 10.0, 10.0, 0.0, 10.0), 1.0);
        // Far outside
        assert_eq!(ring_coverage(0, 0, 10.0, 10.0, 0.0, 5.0), 0.0);
        // Inside the hole of a ring
        assert_eq!(ring_coverage(10, 10, 10.0, 10.0, 4.0, 8.0), 0.0);
        // Edge pixel gets partial coverage
        let edge = ring_coverage(14, 9, 10.0, 10.0, 0.0, 4.5);
        assert!(edge > 0.0 && edge < 1.0);
    }

    #[test]
    fn test_stroke_rect_hollow() {
        let mut fb = PixelBuffer::new(20, 20).unwrap();
        stroke_rect(&mut fb, RectF::new(5.0, 5.0, 10.0, 10.0), 2.0, Color::WHITE);
        // Stroke band spans 4..6 on each side
        assert_eq!(fb.get_pixel(4, 10), Color::WHITE);
        assert_eq!(fb.get_pixel(5, 10), Color::WHITE);
        assert_eq!(fb.get_pixel(10, 10).a, 0);
        assert_eq!(fb.get_pixel(3, 10).a, 0);
    }

    #[test]
    fn test_gradient_stops() {
        let mut g = RadialGradient::new(0.0, 0.0, 0.0, 10.0);
        g.add_color_stop(1.0, Color::with_alpha(255, 255, 255, 0));
        g.add_color_stop(0.0, Color::WHITE);
        assert_eq!(g.color_at(0.0), Color::WHITE);
        assert_eq!(g.color_at(1.0).a, 0);
        assert_eq!(g.color_at(0.5).a, 128);
        assert_eq!(g.sample(20.0, 0.0).a, 0);
    }
}
