// Image loading for frame strips

use super::LoadError;
use image::RgbaImage;
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A decoded image, kept in RGBA8 so it can be sampled by the canvas.
///
/// Handles are immutable once loaded and shared through `Arc`, so several
/// animations may point at the same strip.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    path: String,
    pixels: RgbaImage,
}

impl ImageHandle {
    /// Wrap already-decoded pixels
    pub fn from_rgba(path: impl Into<String>, pixels: RgbaImage) -> Self {
        Self {
            path: path.into(),
            pixels,
        }
    }

    /// Native pixel width
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Native pixel height
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Where the image came from (file path or a synthetic label)
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Decode an in-memory encoded image (PNG/JPEG)
pub fn decode_image(path: &str, bytes: &[u8]) -> Result<Arc<ImageHandle>, LoadError> {
    let decoded = image::load_from_memory(bytes).map_err(|reason| LoadError::Decode {
        path: path.to_string(),
        reason,
    })?;

    let handle = ImageHandle::from_rgba(path, decoded.to_rgba8());
    debug!(
        "Decoded {} ({}x{})",
        path,
        handle.width(),
        handle.height()
    );
    Ok(Arc::new(handle))
}

/// Load and decode an image file
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<Arc<ImageHandle>, LoadError> {
    let path = path.as_ref();
    let name = path.to_string_lossy().to_string();

    if !path.exists() {
        return Err(LoadError::NotFound(name));
    }

    let bytes = std::fs::read(path)?;
    decode_image(&name, &bytes)
}

/// Resolves sprite file names against an asset root directory
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Sub-directory holding frame strips
    pub const SPRITE_DIRECTORY: &'static str = "sprites";

    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for a sprite strip
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        self.base_path.join(Self::SPRITE_DIRECTORY).join(name)
    }

    /// Load a sprite strip by file name
    pub fn load_image(&self, name: &str) -> Result<Arc<ImageHandle>, LoadError> {
        load_image(self.resolve_path(name))
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
