//! PowerPoint (.pptx) presentation writing.
//!
//! A [`MutablePresentation`] owns the slides of a deck while it is being
//! built. Slides hold text boxes, auto shapes, pictures and tables positioned
//! in EMUs; [`MutablePresentation::save`] packages everything into a
//! PresentationML file with a single master, blank layout and theme.
//!
//! # Example
//!
//! ```rust,no_run
//! use slidesmith::common::unit::{Emu, Inches, Rect};
//! use slidesmith::ooxml::pptx::{MutablePresentation, SlideBackground};
//!
//! let mut pres = MutablePresentation::new();
//! let slide = pres.add_slide();
//! slide.set_background(SlideBackground::solid("1A1A2E"));
//! let bounds = Rect::new(Inches(0.5), Inches(2.0), Inches(9.0), Inches(1.0));
//! slide
//!     .add_text_box("Hello", bounds.convert::<Emu>())
//!     .font_size(32.0)
//!     .color("FFFFFF");
//! pres.save("hello.pptx")?;
//! # Ok::<(), slidesmith::ooxml::OoxmlError>(())
//! ```

pub mod backgrounds;
pub mod format;
pub mod template;
pub mod writer;

pub use backgrounds::SlideBackground;
pub use format::{ImageFormat, LineStyle, TextAlign, TextFormat, VerticalAnchor};
pub use writer::{
    CellFormat, Geometry, MutablePresentation, MutableShape, MutableSlide, SlideLayout,
    TableCellXml, TableFrame, split_extent,
};
