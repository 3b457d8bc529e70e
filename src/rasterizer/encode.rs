//! PNG encoding of rendered buffers

use super::render::{render, RenderError, Rendered};
use super::types::PixelBuffer;
use crate::params::Params;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

/// PNG payload ready for display and download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub width: usize,
    pub height: usize,
}

/// Encode a buffer as 8-bit RGBA PNG (no extra metadata)
pub fn encode_png(fb: &PixelBuffer) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        &fb.pixels,
        fb.width as u32,
        fb.height as u32,
        ExtendedColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// A complete render pass: both buffers plus the encoded result
#[derive(Debug, Clone)]
pub struct RenderPass {
    pub rendered: Rendered,
    pub image: EncodedImage,
}

/// Rasterize and encode in one go
pub fn render_pass(params: &Params) -> Result<RenderPass, RenderError> {
    let rendered = render(params)?;
    let bytes = encode_png(&rendered.result)?;
    let image = EncodedImage {
        bytes,
        filename: params.filename(),
        width: rendered.result.width,
        height: rendered.result.height,
    };
    Ok(RenderPass { rendered, image })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{BlendMode, CircleParams, ParticleParams, RingParams, SquareParams};

    #[test]
    fn test_png_decodes_to_same_pixels() {
        let pass = render_pass(&Params::SquareOutline(SquareParams { stroke_width: 3 })).unwrap();
        let decoded = image::load_from_memory(&pass.image.bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (8, 8));
        assert_eq!(decoded.as_raw(), &pass.rendered.result.pixels);
        assert_eq!(pass.image.filename, "wired-rect-3.png");
    }

    #[test]
    fn test_render_is_byte_identical() {
        let all = [
            Params::SquareOutline(SquareParams { stroke_width: 7 }),
            Params::FilledCircle(CircleParams { diameter: 96 }),
            Params::CircleOutline(RingParams::new(200, 17)),
            Params::Particle(ParticleParams { size: 256, mode: BlendMode::Alpha, weight: 73 }),
        ];
        for params in all {
            let a = render_pass(&params).unwrap();
            let b = render_pass(&params).unwrap();
            assert_eq!(a.image, b.image);
        }
    }
}
