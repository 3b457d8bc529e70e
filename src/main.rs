//! texgen: parametric pixel-art texture primitives
//!
//! Renders small sprites for game effects and exports them as PNG:
//! - Square outline (stroke-width swatch)
//! - Filled circle
//! - Circle outline
//! - Radial particle (additive or alpha blended)

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod config;
mod export;
mod logging;
mod params;
mod rasterizer;
mod ui;
mod view;

use macroquad::prelude::*;
use app::AppState;
use config::{load_or_default, CONFIG_PATH};
use logging::{init_logging, LoggingConfig};
use params::Primitive;
use ui::{draw_fixed_tabs, layout as tab_layout, MouseState, Rect, UiContext, ICON_FONT_PATH};
use view::{draw_page, PageAction, TextureCache, SCENE_IMAGE_PATH};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("texgen v{}", VERSION),
        window_width: 960,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let (config, config_error) = load_or_default(CONFIG_PATH);

    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..Default::default()
    });
    if let Some(e) = config_error {
        log::warn!("Ignoring {}: {}", CONFIG_PATH, e);
    }

    let icon_font = match load_ttf_font(ICON_FONT_PATH).await {
        Ok(font) => {
            log::info!("Loaded icon font");
            Some(font)
        }
        Err(e) => {
            log::info!("No icon font ({}), using text buttons", e);
            None
        }
    };

    let scene = match load_texture(SCENE_IMAGE_PATH).await {
        Ok(texture) => {
            texture.set_filter(FilterMode::Linear);
            log::info!("Loaded scene backdrop {}", SCENE_IMAGE_PATH);
            Some(texture)
        }
        Err(e) => {
            log::info!("No scene backdrop ({}), using a flat color", e);
            None
        }
    };

    let mut app = AppState::new(&config);
    let mut textures = TextureCache::new();
    let mut ui_ctx = UiContext::new();
    let mut last_left_down = false;

    log::info!("texgen v{} ready, exporting to {}", VERSION, config.export_dir.display());

    loop {
        let mouse_state = MouseState::poll(last_left_down);
        last_left_down = mouse_state.left_down;
        ui_ctx.begin_frame(mouse_state);

        let screen_w = screen_width();
        let screen_h = screen_height();

        clear_background(Color::from_rgba(30, 30, 35, 255));

        // Tab bar at top
        let tab_bar_rect = Rect::new(0.0, 0.0, screen_w, tab_layout::BAR_HEIGHT);
        let labels = Primitive::ALL.map(|p| p.label());
        if let Some(clicked) = draw_fixed_tabs(&mut ui_ctx, tab_bar_rect, &labels, app.active_index()) {
            if let Some(primitive) = Primitive::from_index(clicked) {
                app.set_active(primitive);
            }
        }

        let content_rect = Rect::new(0.0, tab_layout::BAR_HEIGHT, screen_w, screen_h - tab_layout::BAR_HEIGHT);
        let action = draw_page(&mut ui_ctx, content_rect, &mut app, &mut textures, icon_font.as_ref(), scene.as_ref());
        handle_page_action(action, &mut app);

        // Tooltips last (on top of everything)
        ui_ctx.draw_tooltip();

        next_frame().await;
    }
}

fn handle_page_action(action: PageAction, app: &mut AppState) {
    let Some(pass) = app.pass(app.active) else {
        if action != PageAction::None {
            app.set_status("Nothing to export yet", 3.0);
        }
        return;
    };
    let image = pass.image.clone();

    match action {
        PageAction::SaveAs => match export::save_with_dialog(&image, &app.export_dir) {
            Ok(Some(path)) => app.set_status(&format!("Saved {}", path.display()), 3.0),
            Ok(None) => {}
            Err(e) => {
                log::warn!("Export of {} failed: {}", image.filename, e);
                app.set_status(&format!("Export failed: {}", e), 5.0);
            }
        },
        PageAction::QuickSave => match export::quick_save(&image, &app.export_dir) {
            Ok(path) => app.set_status(&format!("Saved {}", path.display()), 3.0),
            Err(e) => {
                log::warn!("Export of {} failed: {}", image.filename, e);
                app.set_status(&format!("Export failed: {}", e), 5.0);
            }
        },
        PageAction::None => {}
    }
}
