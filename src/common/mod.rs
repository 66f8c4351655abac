//! Common types and utilities shared across the pipeline stages.

pub mod error;
pub mod step;
pub mod unit;
pub mod xml;

pub use error::{Error, Result};
pub use step::StepDescriptor;
pub use unit::{Emu, Inches, Pt, Px, Rect};
