// Startup asset loading. Every asset is required: a missing or corrupt file
// aborts startup with the offending path.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub const JUMPSCARE_IMAGE: &str = "jumpscare_image.jpg";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("missing asset {path}")]
    Missing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not decode audio asset {path}")]
    Audio {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("could not decode image asset {path}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub fn read_bytes(path: &Path) -> Result<Vec<u8>, AssetError> {
    std::fs::read(path).map_err(|source| AssetError::Missing {
        path: path.to_path_buf(),
        source,
    })
}

/// Decoded RGBA8 pixels.
pub struct ImageAsset {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub fn load_image(path: &Path) -> Result<ImageAsset, AssetError> {
    let bytes = read_bytes(path)?;
    let decoded = image::load_from_memory(&bytes).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = decoded.to_rgba8();
    Ok(ImageAsset {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_image_names_the_path() {
        let err = load_image(Path::new("no/such/dir/jumpscare_image.jpg")).err().unwrap();
        assert!(matches!(err, AssetError::Missing { .. }));
        assert!(err.to_string().contains("jumpscare_image.jpg"));
    }

    #[test]
    fn garbage_image_is_a_decode_error() {
        let path = std::env::temp_dir().join("hollow_corridor_not_an_image.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = load_image(&path).err().unwrap();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, AssetError::Image { .. }));
    }
}
