//! Slidesmith - a layout-consistent slide deck compiler
//!
//! Slidesmith turns a sequence of markup templates plus structured data into a
//! PowerPoint (`.pptx`) presentation. Templates are authored in CSS pixel
//! space; the presentation measures in inches. Every region discovered in a
//! template is converted once, at the renderer boundary, so tables and shape
//! stacks injected afterwards land exactly inside their placeholders.
//!
//! # Pipeline
//!
//! - **Assets** ([`assets`]): flowchart and gradient SVGs rasterized to PNG
//!   files that templates reference by path.
//! - **Rendering** ([`render`]): a pluggable [`TemplateRenderer`](render::TemplateRenderer)
//!   appends one slide per template and reports its placeholders in inches.
//! - **Composition** ([`compose`]): tables and vertical step stacks placed in
//!   a page's first placeholder.
//! - **Orchestration** ([`deck`]): assets first, then pages strictly in order,
//!   then a single atomic write of the output file.
//!
//! # Example - Building a deck from a manifest
//!
//! ```no_run
//! use slidesmith::deck::{Deck, DeckSpec};
//!
//! # async fn run() -> slidesmith::Result<()> {
//! let spec = DeckSpec::load("deck.yaml")?;
//! let report = Deck::new().build(&spec).await?;
//! println!("{} slides, {} bytes", report.slides, report.bytes);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Writing a presentation directly
//!
//! ```
//! use slidesmith::common::unit::{Emu, Inches, Rect};
//! use slidesmith::compose::{Payload, TablePayload, compose};
//! use slidesmith::ooxml::pptx::MutablePresentation;
//! use slidesmith::render::{Placeholder, RenderedPage};
//!
//! let mut pres = MutablePresentation::new();
//! pres.add_slide();
//! let page = RenderedPage {
//!     slide_index: 0,
//!     placeholders: vec![Placeholder {
//!         name: None,
//!         rect: Rect::new(Inches(0.5), Inches(1.0), Inches(9.0), Inches(4.0)),
//!     }],
//! };
//! let table = TablePayload::new(
//!     vec![vec!["a".into(), "b".into()], vec!["c".into(), "d".into()]],
//!     vec![0.5, 0.5],
//! );
//! compose(&mut pres, &page, &Payload::Table(table))?;
//!
//! let frame = pres.slide(0).unwrap().shapes()[0].table().unwrap();
//! assert_eq!(frame.col_widths(), &[Emu(4_114_800), Emu(4_114_800)]);
//! # Ok::<(), slidesmith::compose::ComposeError>(())
//! ```

/// Shared units, errors and XML helpers
pub mod common;

/// Flowchart and gradient bitmap generation
pub mod assets;

/// Template rendering into slides
pub mod render;

/// Table and step-stack overlays
pub mod compose;

/// Deck manifests and build orchestration
pub mod deck;

/// PresentationML writing and OPC packaging
pub mod ooxml;

pub use common::{Error, Result};
pub use deck::{Deck, DeckSpec};
