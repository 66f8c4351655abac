//! Template rendering: one markup template becomes one slide.
//!
//! Renderers are pluggable through [`TemplateRenderer`]. A renderer appends
//! exactly one slide per call and reports the placeholder regions it found,
//! already converted to inches, so overlays can be positioned inside them.
//! [`MarkupRenderer`] is the built-in implementation for XHTML templates with
//! absolutely positioned elements.

pub mod error;
pub mod markup;
pub mod style;

pub use error::{RenderError, Result};
pub use markup::{MarkupRenderer, TemplatePage};

use crate::common::unit::{Inches, Rect};
use crate::ooxml::pptx::MutablePresentation;
use std::path::Path;

/// A named region of a rendered page reserved for injected content.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    /// Element id, when the template gave one
    pub name: Option<String>,
    pub rect: Rect<Inches>,
}

/// Result of rendering one template.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    /// Index of the appended slide
    pub slide_index: usize,
    /// Placeholders in document order
    pub placeholders: Vec<Placeholder>,
}

impl RenderedPage {
    pub fn placeholder(&self, name: &str) -> Option<&Placeholder> {
        self.placeholders
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
    }
}

/// Converts a template file into a slide.
///
/// Implementations must append exactly one slide on success and must not
/// touch the presentation on failure.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &Path, pres: &mut MutablePresentation) -> Result<RenderedPage>;
}
