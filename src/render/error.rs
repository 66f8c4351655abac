/// Error types for template rendering.
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

/// A render failure aborts the page; no slide is appended.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// The document has no `<body>` element
    #[error("no <body> element in {}", .0.display())]
    NoMarkup(PathBuf),

    /// Malformed markup or unusable styling
    #[error("{}: {message}", path.display())]
    Markup { path: PathBuf, message: String },

    /// Body size differs from the presentation's slide size
    #[error(
        "{}: body is {body_width:.3}in x {body_height:.3}in but slides are {slide_width:.3}in x {slide_height:.3}in",
        path.display()
    )]
    LayoutMismatch {
        path: PathBuf,
        body_width: f64,
        body_height: f64,
        slide_width: f64,
        slide_height: f64,
    },

    /// An image referenced by the template does not exist
    #[error("image not found: {} (referenced by {})", image.display(), template.display())]
    ImageNotFound { template: PathBuf, image: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("presentation error: {0}")]
    Ooxml(#[from] crate::ooxml::OoxmlError),
}
