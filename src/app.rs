//! Application state
//!
//! Fixed set of primitive tabs sharing one parameter store. Every primitive
//! keeps its last successful render pass; a failed pass leaves it untouched.

use crate::config::ToolConfig;
use crate::params::{BlendMode, Field, ParameterStore, Primitive};
use crate::rasterizer::{render_pass, RenderError, RenderPass};
use std::path::PathBuf;

/// Last good output of one primitive
pub struct PrimitiveOutput {
    pub pass: Option<RenderPass>,
    /// Bumped on every successful render so views know to refresh textures
    pub revision: u64,
}

/// Main application state
pub struct AppState {
    /// Currently shown primitive
    pub active: Primitive,
    /// Current inputs of every primitive
    pub store: ParameterStore,
    /// Outputs, indexed by `Primitive::index()`
    outputs: [PrimitiveOutput; 4],
    /// Where quick saves go
    pub export_dir: PathBuf,
    /// Status message (text, expiry time)
    pub status_message: Option<(String, f64)>,
}

impl AppState {
    /// Create state with default parameters and render every primitive once
    pub fn new(config: &ToolConfig) -> Self {
        let mut app = Self {
            active: config.start_tab,
            store: ParameterStore::new(),
            outputs: std::array::from_fn(|_| PrimitiveOutput { pass: None, revision: 0 }),
            export_dir: config.export_dir.clone(),
            status_message: None,
        };
        for primitive in Primitive::ALL {
            if let Err(e) = app.rerender(primitive) {
                log::warn!("Initial render of {} failed: {}", primitive.label(), e);
            }
        }
        app
    }

    /// Switch to a different tab
    pub fn set_active(&mut self, primitive: Primitive) {
        self.active = primitive;
    }

    /// Get the active tab index (for tab bar)
    pub fn active_index(&self) -> usize {
        self.active.index()
    }

    pub fn output(&self, primitive: Primitive) -> &PrimitiveOutput {
        &self.outputs[primitive.index()]
    }

    /// Last good render pass of a primitive
    pub fn pass(&self, primitive: Primitive) -> Option<&RenderPass> {
        self.outputs[primitive.index()].pass.as_ref()
    }

    /// Apply a slider change and re-render if anything changed.
    /// Returns whether a new output was produced.
    pub fn set_field(&mut self, field: Field, value: u32) -> Result<bool, RenderError> {
        if !self.store.set(field, value) {
            return Ok(false);
        }
        self.rerender(field.primitive())?;
        Ok(true)
    }

    /// Apply a particle mode change and re-render if it changed
    pub fn set_mode(&mut self, mode: BlendMode) -> Result<bool, RenderError> {
        if !self.store.set_mode(mode) {
            return Ok(false);
        }
        self.rerender(Primitive::Particle)?;
        Ok(true)
    }

    /// Run a full render pass. On failure the previous output is kept.
    pub fn rerender(&mut self, primitive: Primitive) -> Result<(), RenderError> {
        let params = self.store.params(primitive);
        let pass = render_pass(&params)?;
        log::debug!(
            "Rendered {} ({} bytes)",
            pass.image.filename,
            pass.image.bytes.len()
        );

        let output = &mut self.outputs[primitive.index()];
        output.pass = Some(pass);
        output.revision += 1;
        Ok(())
    }

    /// Set a status message shown for `duration_secs`
    pub fn set_status(&mut self, message: &str, duration_secs: f64) {
        let expiry = macroquad::time::get_time() + duration_secs;
        self.status_message = Some((message.to_string(), expiry));
    }

    /// Get current status message if not expired
    pub fn get_status(&self) -> Option<&str> {
        if let Some((msg, expiry)) = &self.status_message {
            if macroquad::time::get_time() < *expiry {
                return Some(msg);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_outputs() {
        let app = AppState::new(&ToolConfig::default());
        for primitive in Primitive::ALL {
            let output = app.output(primitive);
            assert_eq!(output.revision, 1);
            assert!(output.pass.is_some());
        }
        let pass = app.pass(Primitive::FilledCircle).unwrap();
        assert_eq!(pass.image.filename, "circle-128x128.png");
    }

    #[test]
    fn test_export_dir_comes_from_config() {
        let config = ToolConfig {
            export_dir: PathBuf::from("sprites/out"),
            ..ToolConfig::default()
        };
        let app = AppState::new(&config);
        assert_eq!(app.export_dir, PathBuf::from("sprites/out"));
    }

    #[test]
    fn test_change_rerenders_only_that_primitive() {
        let mut app = AppState::new(&ToolConfig::default());
        assert!(app.set_field(Field::RingStrokeWidth, 80).unwrap());
        assert_eq!(app.output(Primitive::CircleOutline).revision, 2);
        assert_eq!(app.output(Primitive::FilledCircle).revision, 1);
        let pass = app.pass(Primitive::CircleOutline).unwrap();
        assert_eq!(pass.image.filename, "wired-circle-128x128 (64).png");
    }

    #[test]
    fn test_unchanged_value_skips_render() {
        let mut app = AppState::new(&ToolConfig::default());
        assert!(!app.set_field(Field::SquareStrokeWidth, 10).unwrap());
        assert_eq!(app.output(Primitive::SquareOutline).revision, 1);
        assert!(app.set_mode(BlendMode::Alpha).unwrap());
        assert_eq!(app.output(Primitive::Particle).revision, 2);
    }

    #[test]
    fn test_failed_pass_keeps_last_output() {
        let mut app = AppState::new(&ToolConfig::default());
        app.store.circle.diameter = 0;
        assert!(app.rerender(Primitive::FilledCircle).is_err());
        let output = app.output(Primitive::FilledCircle);
        assert_eq!(output.revision, 1);
        let pass = output.pass.as_ref().unwrap();
        assert_eq!(pass.image.filename, "circle-128x128.png");
    }

    #[test]
    fn test_output_tracks_latest_params() {
        let mut app = AppState::new(&ToolConfig::default());
        app.set_field(Field::ParticleSize, 256).unwrap();
        app.set_field(Field::ParticleWeight, 30).unwrap();
        let pass = app.pass(Primitive::Particle).unwrap();
        assert_eq!(pass.image.filename, "particle-256x256 (30).png");
        assert_eq!((pass.image.width, pass.image.height), (256, 256));
    }
}
