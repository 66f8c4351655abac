/// Error types for asset generation.
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssetError>;

/// Failures are fatal for the asset; nothing is retried.
#[derive(Error, Debug)]
pub enum AssetError {
    /// The generated markup could not be parsed
    #[error("SVG error: {0}")]
    Svg(String),

    /// Zero-sized or oversized canvas
    #[error("cannot allocate a {width}x{height} pixmap")]
    PixmapAllocation { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The asset description itself is unusable
    #[error("invalid asset spec: {0}")]
    InvalidSpec(String),
}

impl From<resvg::usvg::Error> for AssetError {
    fn from(err: resvg::usvg::Error) -> Self {
        AssetError::Svg(err.to_string())
    }
}
