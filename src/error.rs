// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Error type shared by every module of the viewer.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("font not found: {0}")]
    FontNotFound(String),

    #[error("font {0} must be one of: TTF/OTF/PNG/BMP")]
    UnsupportedFontType(PathBuf),

    #[error("failed to parse font: {0}")]
    FontParse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("window error: {0}")]
    Window(String),
}

impl From<toml::de::Error> for ViewerError {
    fn from(err: toml::de::Error) -> Self {
        ViewerError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
