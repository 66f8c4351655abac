//! Unified error type for slidesmith.
//!
//! Each pipeline stage has its own error enum; this module folds them into a
//! single [`Error`] so a deck build can propagate any failure with `?`.

pub mod conversions;
pub mod types;

pub use types::{Error, Result};
