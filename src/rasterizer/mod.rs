//! Software rasterizer for the texture primitives
//!
//! Features:
//! - Exact area coverage for axis-aligned strokes
//! - Edge supersampling for circles and rings
//! - Two-stop radial gradients with source-over compositing
//! - PNG encoding of the result buffer

mod types;
mod shapes;
mod render;
mod encode;

pub use types::*;
pub use render::*;
pub use encode::*;

/// Preview canvas dimensions (2x a 320x180 scene)
pub const PREVIEW_WIDTH: usize = 640;
pub const PREVIEW_HEIGHT: usize = 360;

/// Screen height the preview scene stands in for; sizes are scaled by PREVIEW_HEIGHT / REFERENCE_HEIGHT
pub const REFERENCE_HEIGHT: usize = 1080;

/// Side of the frame the square outline preview is fitted into
pub const PREVIEW_FRAME: f32 = 128.0;

/// Largest canvas side accepted by the rasterizer
pub const MAX_CANVAS_SIZE: usize = 4096;
