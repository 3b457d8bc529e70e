//! Primitive rasterization
//!
//! One routine per primitive. Each is a pure function of its parameters and
//! returns a fixed-resolution preview buffer plus the exact-size result buffer.

use super::shapes::{fill_circle, fill_circle_gradient, stroke_circle, stroke_rect, RadialGradient, RectF};
use super::types::{Color, PixelBuffer};
use super::{PREVIEW_FRAME, PREVIEW_HEIGHT, PREVIEW_WIDTH, REFERENCE_HEIGHT};
use crate::params::{BlendMode, CircleParams, Params, ParticleParams, RingParams, SquareParams};

/// Error type for a single render pass
#[derive(Debug)]
pub enum RenderError {
    InvalidSize { width: usize, height: usize },
    EncodeError(image::ImageError),
}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        RenderError::EncodeError(e)
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::InvalidSize { width, height } => {
                write!(f, "Invalid canvas size: {}x{}", width, height)
            }
            RenderError::EncodeError(e) => write!(f, "PNG encode error: {}", e),
        }
    }
}

impl std::error::Error for RenderError {}

/// Output of one render pass
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Display-only buffer at preview resolution
    pub preview: PixelBuffer,
    /// Exact-output-size buffer (the one that gets exported)
    pub result: PixelBuffer,
}

/// Render any primitive from its parameter set
pub fn render(params: &Params) -> Result<Rendered, RenderError> {
    match params {
        Params::SquareOutline(p) => render_square_outline(p),
        Params::FilledCircle(p) => render_filled_circle(p),
        Params::CircleOutline(p) => render_circle_outline(p),
        Params::Particle(p) => render_particle(p),
    }
}

fn preview_canvas() -> Result<PixelBuffer, RenderError> {
    PixelBuffer::new(PREVIEW_WIDTH, PREVIEW_HEIGHT)
}

/// Ratio mapping reference-resolution sizes onto the preview canvas
fn preview_scale() -> f32 {
    PREVIEW_HEIGHT as f32 / REFERENCE_HEIGHT as f32
}

/// Hollow square: preview outline plus a (2W+2)^2 stroke-width swatch
pub fn render_square_outline(p: &SquareParams) -> Result<Rendered, RenderError> {
    let w = p.stroke_width as usize;

    // Stroke straddles the path, so shrink the side to keep the outline inside the frame
    let mut preview = preview_canvas()?;
    let side = PREVIEW_FRAME - p.stroke_width as f32;
    let path = RectF::new(
        (PREVIEW_WIDTH as f32 - side) / 2.0,
        (PREVIEW_HEIGHT as f32 - side) / 2.0,
        side,
        side,
    );
    stroke_rect(&mut preview, path, p.stroke_width as f32, Color::WHITE);

    let size = w * 2 + 2;
    let mut result = PixelBuffer::new(size, size)?;
    result.clear(Color::WHITE);
    result.clear_rect(w, w, 2, 2);

    Ok(Rendered { preview, result })
}

/// Filled anti-aliased disc
pub fn render_filled_circle(p: &CircleParams) -> Result<Rendered, RenderError> {
    let d = p.diameter as usize;

    let mut preview = preview_canvas()?;
    let scaled = p.diameter as f32 * preview_scale();
    fill_circle(
        &mut preview,
        PREVIEW_WIDTH as f32 / 2.0,
        PREVIEW_HEIGHT as f32 / 2.0,
        scaled / 2.0,
        Color::WHITE,
    );

    let mut result = PixelBuffer::new(d, d)?;
    let half = d as f32 / 2.0;
    fill_circle(&mut result, half, half, half, Color::WHITE);

    Ok(Rendered { preview, result })
}

/// Circle outline whose outer stroke edge touches the nominal diameter
pub fn render_circle_outline(p: &RingParams) -> Result<Rendered, RenderError> {
    let d = p.diameter() as usize;

    let mut preview = preview_canvas()?;
    let scaled_w = p.stroke_width() as f32 * preview_scale();
    let scaled_d = p.diameter() as f32 * preview_scale();
    stroke_circle(
        &mut preview,
        PREVIEW_WIDTH as f32 / 2.0,
        PREVIEW_HEIGHT as f32 / 2.0,
        (scaled_d - scaled_w) / 2.0,
        scaled_w,
        Color::WHITE,
    );

    let mut result = PixelBuffer::new(d, d)?;
    let half = d as f32 / 2.0;
    stroke_circle(
        &mut result,
        half,
        half,
        p.ring_radius(),
        p.stroke_width() as f32,
        Color::WHITE,
    );

    Ok(Rendered { preview, result })
}

/// Radial alpha falloff sprite. The same canvas serves as preview and result.
pub fn render_particle(p: &ParticleParams) -> Result<Rendered, RenderError> {
    let s = p.size as usize;
    let mut canvas = PixelBuffer::new(s, s)?;

    // Additive sprites are exported on opaque black
    if p.mode == BlendMode::Add {
        canvas.clear(Color::BLACK);
    }

    let center = s as f32 / 2.0;
    let radius = p.falloff_radius();
    let mut gradient = RadialGradient::new(center, center, 0.0, radius);
    gradient.add_color_stop(0.0, Color::WHITE);
    gradient.add_color_stop(1.0, Color::with_alpha(255, 255, 255, 0));
    fill_circle_gradient(&mut canvas, center, center, radius, &gradient);

    Ok(Rendered {
        preview: canvas.clone(),
        result: canvas,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PARTICLE_SIZES;

    fn square(w: u32) -> SquareParams {
        SquareParams { stroke_width: w }
    }

    #[test]
    fn test_square_result_hole() {
        for w in 1..=50u32 {
            let out = render_square_outline(&square(w)).unwrap();
            let size = (w * 2 + 2) as usize;
            let wu = w as usize;
            assert_eq!((out.result.width, out.result.height), (size, size));

            let mut transparent = 0;
            for (x, y, c) in out.result.iter_pixels() {
                let in_hole = (wu..wu + 2).contains(&x) && (wu..wu + 2).contains(&y);
                if in_hole {
                    assert_eq!(c.a, 0, "w={} ({}, {})", w, x, y);
                    transparent += 1;
                } else {
                    assert_eq!(c, Color::WHITE, "w={} ({}, {})", w, x, y);
                }
            }
            assert_eq!(transparent, 4);
        }
    }

    #[test]
    fn test_square_scenario_stroke_10() {
        let out = render_square_outline(&square(10)).unwrap();
        assert_eq!((out.result.width, out.result.height), (22, 22));
        assert_eq!(out.result.get_pixel(10, 10).a, 0);
        assert_eq!(out.result.get_pixel(11, 11).a, 0);
        assert_eq!(out.result.get_pixel(12, 12), Color::WHITE);
        assert_eq!(out.result.get_pixel(9, 9), Color::WHITE);
    }

    #[test]
    fn test_square_preview_stays_in_frame() {
        let out = render_square_outline(&square(10)).unwrap();
        assert_eq!((out.preview.width, out.preview.height), (PREVIEW_WIDTH, PREVIEW_HEIGHT));
        // Outer edge of the stroke is the 128px frame: x in 256..384, y in 116..244
        assert_eq!(out.preview.get_pixel(256, 180), Color::WHITE);
        assert_eq!(out.preview.get_pixel(383, 180), Color::WHITE);
        assert_eq!(out.preview.get_pixel(255, 180).a, 0);
        assert_eq!(out.preview.get_pixel(384, 180).a, 0);
        assert_eq!(out.preview.get_pixel(320, 116), Color::WHITE);
        // Interior is hollow
        assert_eq!(out.preview.get_pixel(320, 180).a, 0);
    }

    #[test]
    fn test_filled_circle_every_diameter() {
        for d in (2..=512u32).step_by(2) {
            let out = render_filled_circle(&CircleParams { diameter: d }).unwrap();
            let du = d as usize;
            assert_eq!((out.result.width, out.result.height), (du, du));

            let center = out.result.get_pixel(du / 2, du / 2);
            if d >= 4 {
                assert_eq!(center, Color::WHITE, "d={}", d);
            } else {
                assert!(center.a > 0, "d={}", d);
                assert_eq!((center.r, center.g, center.b), (255, 255, 255));
            }

            // Smaller discs reach into the corner pixels
            if d >= 8 {
                assert_eq!(out.result.get_pixel(0, 0).a, 0, "d={}", d);
                assert_eq!(out.result.get_pixel(du - 1, 0).a, 0, "d={}", d);
                assert_eq!(out.result.get_pixel(0, du - 1).a, 0, "d={}", d);
                assert_eq!(out.result.get_pixel(du - 1, du - 1).a, 0, "d={}", d);
            }
        }
    }

    /// Stroke widths worth checking for a diameter: thin, mid and the clamp edge
    fn ring_widths(d: u32) -> Vec<u32> {
        let max = d / 2;
        let mut widths: Vec<u32> = [1, 2, 3, d / 8, d / 4, max.saturating_sub(2), max.saturating_sub(1), max]
            .into_iter()
            .filter(|w| (1..=max).contains(w))
            .collect();
        widths.sort_unstable();
        widths.dedup();
        widths
    }

    #[test]
    fn test_circle_outline_grid() {
        let diameters = (2..=512u32).step_by(14).chain([4, 6, 8, 10, 100, 128, 512]);
        for d in diameters {
            for w in ring_widths(d) {
                let p = RingParams::new(d, w);
                assert_eq!(p.stroke_width(), w);
                let out = render_circle_outline(&p).unwrap();
                let du = d as usize;
                assert_eq!((out.result.width, out.result.height), (du, du));

                // Pixels holding the stroke's center line on both axes, both sides
                let half = d as f32 / 2.0;
                let c = du / 2;
                let far = (half + p.ring_radius()).floor() as usize;
                let near = (half - p.ring_radius()).floor() as usize;
                for (x, y) in [(far, c), (c, far), (near, c), (c, near)] {
                    assert!(out.result.get_pixel(x, y).a > 0, "d={} w={} ({}, {})", d, w, x, y);
                }

                if half - w as f32 >= 2.0 {
                    assert_eq!(out.result.get_pixel(c, c).a, 0, "d={} w={}", d, w);
                }
            }
        }
    }

    const SWEEP_WEIGHTS: [u32; 9] = [0, 1, 10, 25, 33, 50, 75, 99, 100];

    #[test]
    fn test_particle_add_is_opaque() {
        for size in PARTICLE_SIZES {
            for weight in SWEEP_WEIGHTS {
                let p = ParticleParams { size, mode: BlendMode::Add, weight };
                let out = render_particle(&p).unwrap();
                assert!(
                    out.result.iter_pixels().all(|(_, _, c)| c.a == 255),
                    "size={} weight={}",
                    size,
                    weight
                );
                assert_eq!(out.preview, out.result);
            }
        }
    }

    #[test]
    fn test_particle_scenario_128_add_50() {
        let p = ParticleParams { size: 128, mode: BlendMode::Add, weight: 50 };
        assert_eq!(p.falloff_radius(), 32.0);
        let out = render_particle(&p).unwrap();
        // Outside the disc it is the black base, the center is white
        assert_eq!(out.result.get_pixel(0, 0), Color::BLACK);
        assert_eq!(out.result.get_pixel(127, 64), Color::BLACK);
        assert!(out.result.get_pixel(64, 64).r > 240);
    }

    #[test]
    fn test_particle_alpha_outside_radius_transparent() {
        for size in PARTICLE_SIZES {
            for weight in SWEEP_WEIGHTS {
                let p = ParticleParams { size, mode: BlendMode::Alpha, weight };
                let r = p.falloff_radius();
                let center = size as f32 / 2.0;
                let out = render_particle(&p).unwrap();
                for (x, y, c) in out.result.iter_pixels() {
                    // Nearest point of the pixel to the center
                    let nx = center.clamp(x as f32, x as f32 + 1.0) - center;
                    let ny = center.clamp(y as f32, y as f32 + 1.0) - center;
                    if (nx * nx + ny * ny).sqrt() > r {
                        assert_eq!(c.a, 0, "size={} weight={} ({}, {})", size, weight, x, y);
                    }
                }
            }
        }
    }

    #[test]
    fn test_particle_zero_weight() {
        let p = ParticleParams { size: 32, mode: BlendMode::Add, weight: 0 };
        let out = render_particle(&p).unwrap();
        assert!(out.result.iter_pixels().all(|(_, _, c)| c == Color::BLACK));

        let p = ParticleParams { size: 32, mode: BlendMode::Alpha, weight: 0 };
        let out = render_particle(&p).unwrap();
        assert!(out.result.iter_pixels().all(|(_, _, c)| c.a == 0));
    }

    #[test]
    fn test_invalid_size_propagates() {
        let err = render_filled_circle(&CircleParams { diameter: 0 }).unwrap_err();
        assert!(matches!(err, RenderError::InvalidSize { width: 0, height: 0 }));
    }
}
