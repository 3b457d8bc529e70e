//! Primitive page: Preview, Controls and Result panels
//!
//! Layout:
//! - left column: preview (top) and controls (bottom)
//! - right column: result thumbnail, size caption, export buttons
//! - status bar along the bottom

use macroquad::prelude::*;
use crate::app::AppState;
use crate::params::{BlendMode, FieldSpec, Primitive};
use crate::rasterizer::PixelBuffer;
use crate::ui::{
    draw_centered_text, draw_checkerboard, draw_panel, draw_slider, draw_toggle_group, icon,
    icon_button, panel_content_rect, text_button, Rect, UiContext, LABEL_COLOR, MUTED_COLOR,
};

/// Result thumbnail size on screen
const THUMB_SIZE: f32 = 128.0;
/// Transparency checkerboard tile size
const CHECKER_TILE: f32 = 16.0;
const CHECKER_LIGHT: Color = Color::new(1.0, 1.0, 1.0, 1.0);
const CHECKER_DARK: Color = Color::new(0.8, 0.8, 0.8, 1.0);
/// Optional backdrop image for the preview scene, relative to the working directory
pub const SCENE_IMAGE_PATH: &str = "assets/scene.png";
/// Backdrop behind the 16:9 preview scene when no image is loaded
const SCENE_BG: Color = Color::new(0.23, 0.33, 0.45, 1.0);
const PANEL_BG: Color = Color::new(0.137, 0.137, 0.157, 1.0);

const RESULT_COLUMN_WIDTH: f32 = 240.0;
const CONTROL_ROW_HEIGHT: f32 = 30.0;
const STATUS_HEIGHT: f32 = 22.0;

/// Actions that can be triggered from a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    None,
    /// Save through the native dialog
    SaveAs,
    /// Save straight into the export directory
    QuickSave,
}

/// GPU textures for one primitive's last render
struct CachedTextures {
    revision: u64,
    preview: Texture2D,
    result: Texture2D,
}

/// Uploads render output to textures, only when the output changed
pub struct TextureCache {
    entries: [Option<CachedTextures>; 4],
}

impl TextureCache {
    pub fn new() -> Self {
        Self {
            entries: [None, None, None, None],
        }
    }

    fn get(&mut self, app: &AppState, primitive: Primitive) -> Option<&CachedTextures> {
        let output = app.output(primitive);
        let pass = output.pass.as_ref()?;
        let slot = &mut self.entries[primitive.index()];

        let stale = slot.as_ref().map_or(true, |c| c.revision != output.revision);
        if stale {
            // Thumbnail comes from the encoded PNG so it shows exactly what gets exported
            let result = match ::image::load_from_memory(&pass.image.bytes) {
                Ok(decoded) => {
                    let rgba = decoded.to_rgba8();
                    Texture2D::from_rgba8(rgba.width() as u16, rgba.height() as u16, rgba.as_raw())
                }
                Err(e) => {
                    log::warn!("Could not decode {}: {}", pass.image.filename, e);
                    buffer_texture(&pass.rendered.result)
                }
            };
            result.set_filter(FilterMode::Nearest);
            *slot = Some(CachedTextures {
                revision: output.revision,
                preview: buffer_texture(&pass.rendered.preview),
                result,
            });
        }
        slot.as_ref()
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

fn buffer_texture(fb: &PixelBuffer) -> Texture2D {
    let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
    texture.set_filter(FilterMode::Linear);
    texture
}

/// Draw the active primitive's page, returns action if triggered
pub fn draw_page(
    ctx: &mut UiContext,
    rect: Rect,
    app: &mut AppState,
    cache: &mut TextureCache,
    icon_font: Option<&Font>,
    scene: Option<&Texture2D>,
) -> PageAction {
    let primitive = app.active;

    let status_rect = rect.slice_bottom(STATUS_HEIGHT);
    let main_rect = rect.remaining_after_bottom(STATUS_HEIGHT).pad(8.0);

    let result_rect = Rect::new(
        main_rect.right() - RESULT_COLUMN_WIDTH,
        main_rect.y,
        RESULT_COLUMN_WIDTH,
        main_rect.h,
    );
    let left_rect = Rect::new(main_rect.x, main_rect.y, (main_rect.w - RESULT_COLUMN_WIDTH - 8.0).max(0.0), main_rect.h);

    let control_rows = primitive.fields().len() + usize::from(primitive == Primitive::Particle);
    let controls_h = 22.0 + 12.0 + control_rows as f32 * CONTROL_ROW_HEIGHT;
    let controls_rect = left_rect.slice_bottom(controls_h);
    let preview_rect = left_rect.remaining_after_bottom(controls_h + 8.0);

    let textures = cache.get(app, primitive);

    draw_panel(preview_rect, Some("Preview"), PANEL_BG);
    draw_preview(panel_content_rect(preview_rect, true), primitive, textures.map(|t| &t.preview), scene);

    draw_panel(result_rect, Some("Result"), PANEL_BG);
    let action = draw_result(ctx, panel_content_rect(result_rect, true), app, textures.map(|t| &t.result), icon_font);

    draw_panel(controls_rect, Some("Controls"), PANEL_BG);
    draw_controls(ctx, panel_content_rect(controls_rect, true), app, icon_font);

    draw_status_bar(status_rect, app);

    if action != PageAction::None {
        return action;
    }
    shortcut_action()
}

/// Part of a backdrop image shown behind the scene: the largest centered 16:9 crop
fn scene_crop(image_w: f32, image_h: f32) -> Rect {
    Rect::new(0.0, 0.0, image_w, image_h).fit_aspect(16.0 / 9.0)
}

fn draw_preview(rect: Rect, primitive: Primitive, texture: Option<&Texture2D>, scene: Option<&Texture2D>) {
    // Particles preview at native size over the transparency grid, the rest in a 16:9 scene
    let target = if primitive == Primitive::Particle {
        let r = rect.centered(THUMB_SIZE, THUMB_SIZE);
        draw_checkerboard(r, CHECKER_TILE, CHECKER_LIGHT, CHECKER_DARK);
        r
    } else {
        let r = rect.fit_aspect(16.0 / 9.0);
        match scene {
            Some(scene) => {
                let crop = scene_crop(scene.width(), scene.height());
                draw_texture_ex(
                    scene,
                    r.x,
                    r.y,
                    WHITE,
                    DrawTextureParams {
                        dest_size: Some(vec2(r.w, r.h)),
                        source: Some(macroquad::math::Rect::new(crop.x, crop.y, crop.w, crop.h)),
                        ..Default::default()
                    },
                );
            }
            None => draw_rectangle(r.x, r.y, r.w, r.h, SCENE_BG),
        }
        r
    };

    if let Some(texture) = texture {
        draw_texture_ex(
            texture,
            target.x,
            target.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(target.w, target.h)),
                ..Default::default()
            },
        );
    }
}

fn draw_result(
    ctx: &mut UiContext,
    rect: Rect,
    app: &mut AppState,
    texture: Option<&Texture2D>,
    icon_font: Option<&Font>,
) -> PageAction {
    let primitive = app.active;
    let params = app.store.params(primitive);

    let thumb = Rect::new((rect.center_x() - THUMB_SIZE * 0.5).round(), rect.y + 12.0, THUMB_SIZE, THUMB_SIZE);
    draw_checkerboard(thumb, CHECKER_TILE, CHECKER_LIGHT, CHECKER_DARK);
    draw_rectangle_lines(thumb.x - 1.0, thumb.y - 1.0, thumb.w + 2.0, thumb.h + 2.0, 1.0, Color::from_rgba(0, 0, 0, 80));
    if let Some(texture) = texture {
        draw_texture_ex(
            texture,
            thumb.x,
            thumb.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(thumb.w, thumb.h)),
                ..Default::default()
            },
        );
    }

    let caption_rect = Rect::new(rect.x, thumb.bottom() + 6.0, rect.w, 18.0);
    draw_centered_text(&params.caption(), &caption_rect, 14.0, MUTED_COLOR);

    // Filename of the last good render (may lag params after a failed pass)
    let filename = app
        .pass(primitive)
        .map(|p| p.image.filename.clone())
        .unwrap_or_default();
    let name_rect = Rect::new(rect.x, caption_rect.bottom() + 4.0, rect.w, 18.0);
    draw_centered_text(&filename, &name_rect, 12.0, LABEL_COLOR);

    let mut action = PageAction::None;
    let button_w = (rect.w - 8.0) * 0.5;
    let buttons_y = name_rect.bottom() + 12.0;

    let save_as_rect = Rect::new(rect.x, buttons_y, button_w, 28.0);
    if text_button(ctx, save_as_rect, "Save As...", "Choose where to save (Ctrl+S)") {
        action = PageAction::SaveAs;
    }

    let quick_rect = Rect::new(rect.x + button_w + 8.0, buttons_y, button_w - 32.0, 28.0);
    if text_button(ctx, quick_rect, "Download", "Save into the export folder (Ctrl+E)") {
        action = PageAction::QuickSave;
    }

    let folder_rect = Rect::new(quick_rect.right() + 4.0, buttons_y, 28.0, 28.0);
    let folder_tip = format!("Export folder: {}", app.export_dir.display());
    if icon_button(ctx, folder_rect, icon::FOLDER_OPEN, "...", icon_font, &folder_tip) {
        app.set_status(&folder_tip, 3.0);
    }

    action
}

fn draw_controls(ctx: &mut UiContext, rect: Rect, app: &mut AppState, icon_font: Option<&Font>) {
    let primitive = app.active;
    let mut row_y = rect.y;

    if primitive == Primitive::Particle {
        let row = Rect::new(rect.x, row_y, rect.w, CONTROL_ROW_HEIGHT);
        draw_row_label(&row, "Type");
        let labels: Vec<&str> = BlendMode::ALL.iter().map(|m| m.label()).collect();
        let selected = BlendMode::ALL
            .iter()
            .position(|m| *m == app.store.particle.mode)
            .unwrap_or(0);
        let group = Rect::new(rect.x + 80.0, row_y + 3.0, 240.0_f32.min(rect.w - 80.0), CONTROL_ROW_HEIGHT - 6.0);
        if let Some(i) = draw_toggle_group(ctx, group, &labels, selected) {
            let result = app.set_mode(BlendMode::ALL[i]);
            report(app, result);
        }
        row_y += CONTROL_ROW_HEIGHT;
    }

    for spec in primitive.fields() {
        let row = Rect::new(rect.x, row_y, rect.w, CONTROL_ROW_HEIGHT);
        draw_field_row(ctx, row, spec, app, icon_font);
        row_y += CONTROL_ROW_HEIGHT;
    }
}

fn draw_row_label(row: &Rect, label: &str) {
    draw_text(label, row.x.round(), (row.center_y() + 5.0).round(), 14.0, LABEL_COLOR);
}

/// Label, minus button, slider, plus button, value
fn draw_field_row(ctx: &mut UiContext, row: Rect, spec: &FieldSpec, app: &mut AppState, icon_font: Option<&Font>) {
    let value = app.store.get(spec.field);
    draw_row_label(&row, spec.label);

    let button = 22.0;
    let value_w = 56.0;
    let minus_rect = Rect::new(row.x + 80.0, row.center_y() - button * 0.5, button, button);
    let plus_rect = Rect::new(row.right() - value_w - button - 4.0, minus_rect.y, button, button);
    let slider_rect = Rect::new(minus_rect.right() + 6.0, row.y, (plus_rect.x - minus_rect.right() - 12.0).max(0.0), row.h);

    let mut new_value = None;

    if icon_button(ctx, minus_rect, icon::MINUS, "-", icon_font, "") {
        new_value = Some(spec.nudge(value, false));
    }

    let marks: Vec<f32> = spec
        .marks
        .map(|m| m.iter().map(|v| spec.fraction_of(*v)).collect())
        .unwrap_or_default();
    if let Some(t) = draw_slider(ctx, slider_rect, spec.fraction_of(value), &marks) {
        new_value = Some(spec.value_at(t));
    }

    if icon_button(ctx, plus_rect, icon::PLUS, "+", icon_font, "") {
        new_value = Some(spec.nudge(value, true));
    }

    let value_rect = Rect::new(row.right() - value_w, row.y, value_w, row.h);
    draw_centered_text(&spec.format(value), &value_rect, 14.0, LABEL_COLOR);

    if let Some(v) = new_value {
        if v != value {
            let result = app.set_field(spec.field, v);
            report(app, result);
        }
    }
}

/// Surface a failed render pass; the previous output stays on screen
fn report(app: &mut AppState, result: Result<bool, crate::rasterizer::RenderError>) {
    if let Err(e) = result {
        log::warn!("Render failed for {}: {}", app.active.label(), e);
        app.set_status(&format!("Render failed: {}", e), 5.0);
    }
}

fn draw_status_bar(rect: Rect, app: &AppState) {
    draw_rectangle(rect.x.floor(), rect.y.floor(), rect.w, rect.h, Color::from_rgba(40, 40, 45, 255));

    if let Some(msg) = app.get_status() {
        draw_text(msg, (rect.x + 8.0).floor(), (rect.y + 15.0).floor(), 16.0, Color::from_rgba(100, 255, 100, 255));
    }

    #[cfg(not(target_arch = "wasm32"))]
    let hints = "Ctrl+S: Save As | Ctrl+E: Download";
    #[cfg(target_arch = "wasm32")]
    let hints = "Export is not available in the browser";

    let dims = measure_text(hints, None, 14, 1.0);
    draw_text(
        hints,
        (rect.right() - dims.width - 8.0).floor(),
        (rect.y + 15.0).floor(),
        14.0,
        Color::from_rgba(100, 100, 100, 255),
    );
}

/// Keyboard shortcuts (Ctrl/Cmd + key)
fn shortcut_action() -> PageAction {
    let ctrl = is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl)
        || is_key_down(KeyCode::LeftSuper) || is_key_down(KeyCode::RightSuper);
    if !ctrl {
        return PageAction::None;
    }
    if is_key_pressed(KeyCode::S) {
        PageAction::SaveAs
    } else if is_key_pressed(KeyCode::E) {
        PageAction::QuickSave
    } else {
        PageAction::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_crop_wide_image() {
        // Panorama strips keep full height and lose the sides
        let crop = scene_crop(2048.0, 512.0);
        assert_eq!(crop.h, 512.0);
        assert!((crop.w - 512.0 * 16.0 / 9.0).abs() < 1e-3);
        assert!((crop.center_x() - 1024.0).abs() < 1e-3);
    }

    #[test]
    fn test_scene_crop_tall_image() {
        let crop = scene_crop(1600.0, 1600.0);
        assert_eq!((crop.x, crop.w), (0.0, 1600.0));
        assert_eq!(crop.h, 900.0);
        assert_eq!(crop.y, 350.0);
    }
}
