/// Error types for overlay composition.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ComposeError>;

#[derive(Error, Debug)]
pub enum ComposeError {
    /// Ragged rows, bad column ratios or an empty table
    #[error("invalid table: {0}")]
    InvalidTable(String),

    /// A color that is not six hex digits
    #[error("invalid color {value:?} for {field}: expected six hex digits")]
    InvalidColor { field: String, value: String },

    /// Step stack taller than its placeholder under `OverflowPolicy::Reject`
    #[error("step stack needs {required:.2}in but the placeholder is {available:.2}in tall")]
    Overflow { required: f64, available: f64 },

    #[error("slide not found: index {0}")]
    SlideNotFound(usize),

    #[error("presentation error: {0}")]
    Ooxml(#[from] crate::ooxml::OoxmlError),
}
