//! Office Open XML (OOXML) presentation writing.
//!
//! The module is organized in two layers:
//!
//! 1. **OPC Layer** (`opc`): package parts, relationships, content types and
//!    the ZIP container.
//! 2. **PresentationML** (`pptx`): the mutable presentation model that the
//!    deck pipeline fills in, and its serialization into OPC parts.
pub mod error;
pub mod opc;
pub mod pptx;

pub use error::{OoxmlError, Result};
pub use opc::{OpcPackage, PackURI};
pub use pptx::{MutablePresentation, MutableSlide};
