//! Deck orchestration.
//!
//! A [`DeckSpec`] lists assets and pages. [`Deck::build`] generates every
//! asset first, then renders and composes the pages strictly in order on a
//! single owned [`MutablePresentation`](crate::ooxml::pptx::MutablePresentation),
//! and finally writes the `.pptx` once. A failure anywhere aborts the build
//! and leaves no output file behind.

pub mod demo;
pub mod manifest;
pub mod orchestrator;

pub use demo::demo_deck;
pub use manifest::{DeckSpec, ManifestError, PageSpec};
pub use orchestrator::{BuildReport, Deck, DeckBuilder, Phase};
