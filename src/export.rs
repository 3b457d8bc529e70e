//! Writing encoded images to disk
//!
//! Native builds offer a save dialog pre-filled with the generated filename,
//! plus a quick save straight into the configured export directory.

use crate::rasterizer::EncodedImage;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for exports
#[derive(Debug)]
pub enum ExportError {
    IoError(std::io::Error),
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    Unsupported,
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::IoError(e)
    }
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::IoError(e) => write!(f, "IO error: {}", e),
            ExportError::Unsupported => write!(f, "Export is not available on this platform"),
        }
    }
}

impl std::error::Error for ExportError {}

/// Write the PNG payload to an explicit path
pub fn write_image<P: AsRef<Path>>(image: &EncodedImage, path: P) -> Result<(), ExportError> {
    fs::write(path, &image.bytes)?;
    Ok(())
}

/// Save into `dir` under the generated filename, creating the directory if needed
pub fn quick_save<P: AsRef<Path>>(image: &EncodedImage, dir: P) -> Result<PathBuf, ExportError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(&image.filename);
    write_image(image, &path)?;
    log::info!("Exported {} ({}x{})", path.display(), image.width, image.height);
    Ok(path)
}

/// Best-effort creation of the dialog's starting directory.
/// A failure only means the dialog opens somewhere else.
#[cfg(not(target_arch = "wasm32"))]
fn ensure_export_dir(dir: &Path) -> bool {
    match fs::create_dir_all(dir) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("Could not create {}: {}", dir.display(), e);
            false
        }
    }
}

/// Ask for a destination with a native save dialog.
/// Returns `Ok(None)` when the user cancels.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_with_dialog<P: AsRef<Path>>(image: &EncodedImage, dir: P) -> Result<Option<PathBuf>, ExportError> {
    let dir = dir.as_ref();
    ensure_export_dir(dir);

    let dialog = rfd::FileDialog::new()
        .add_filter("PNG Image", &["png"])
        .set_directory(dir)
        .set_file_name(image.filename.as_str());

    match dialog.save_file() {
        Some(path) => {
            write_image(image, &path)?;
            log::info!("Exported {} ({}x{})", path.display(), image.width, image.height);
            Ok(Some(path))
        }
        None => {
            log::debug!("Save dialog cancelled");
            Ok(None)
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn save_with_dialog<P: AsRef<Path>>(_image: &EncodedImage, _dir: P) -> Result<Option<PathBuf>, ExportError> {
    Err(ExportError::Unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Params, SquareParams};
    use crate::rasterizer::render_pass;

    #[test]
    fn test_quick_save_writes_png() {
        let dir = std::env::temp_dir().join(format!("texgen-export-{}", std::process::id()));
        let pass = render_pass(&Params::SquareOutline(SquareParams { stroke_width: 10 })).unwrap();

        let path = quick_save(&pass.image, &dir).unwrap();
        assert_eq!(path, dir.join("wired-rect-10.png"));
        assert_eq!(fs::read(&path).unwrap(), pass.image.bytes);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_export_dir_under_a_file_is_reported() {
        let root = std::env::temp_dir().join(format!("texgen-blocked-{}", std::process::id()));
        fs::create_dir_all(&root).unwrap();
        let file = root.join("not-a-dir");
        fs::write(&file, b"x").unwrap();

        assert!(!ensure_export_dir(&file.join("exports")));
        assert!(ensure_export_dir(&root.join("exports")));

        let _ = fs::remove_dir_all(&root);
    }
}
