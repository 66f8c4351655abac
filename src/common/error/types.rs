//! Top-level error enum.
use thiserror::Error;

use crate::assets::AssetError;
use crate::compose::ComposeError;
use crate::deck::ManifestError;
use crate::ooxml::error::OoxmlError;
use crate::render::RenderError;

/// Main error type for slidesmith operations.
///
/// Every variant is terminal for the run: the pipeline never retries and
/// never downgrades a failure to a warning.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error outside of a specific stage (e.g. writing the final deck)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Asset generation failed (bad SVG, raster engine error, unwritable path)
    #[error("Asset generation failed: {0}")]
    Asset(#[from] AssetError),

    /// A template could not be resolved or rendered
    #[error("Template rendering failed: {0}")]
    Render(#[from] RenderError),

    /// An overlay could not be composed onto a page
    #[error("Overlay composition failed: {0}")]
    Compose(#[from] ComposeError),

    /// Presentation document or package error
    #[error("Presentation error: {0}")]
    Ooxml(#[from] OoxmlError),

    /// Deck manifest could not be loaded
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// A pipeline step was invoked out of order
    #[error("Invalid build state: {0}")]
    InvalidState(String),

    /// A blocking task panicked or was cancelled
    #[error("Task failed: {0}")]
    Task(String),
}

/// Result type for slidesmith operations.
pub type Result<T> = std::result::Result<T, Error>;
