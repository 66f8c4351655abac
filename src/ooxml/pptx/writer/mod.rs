//! Mutable presentation writer components for PPTX.

mod package;
pub mod pres;
pub(crate) mod relmap;
pub mod shape;
pub mod slide;
pub mod table;

pub use pres::{MutablePresentation, SlideLayout};
pub use shape::{Geometry, MutableShape};
pub use slide::MutableSlide;
pub use table::{CellFormat, TableCellXml, TableFrame, split_extent};
