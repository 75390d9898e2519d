// Asset loading
//
// Decodes frame-strip images from disk into shared, immutable handles.

mod loader;

pub use loader::{decode_image, load_image, AssetLoader, ImageHandle};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: String, reason: image::ImageError },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_display() {
        let err = LoadError::NotFound("sprites/walk.png".to_string());
        assert_eq!(err.to_string(), "Asset not found: sprites/walk.png");
    }
}
