//! XML text helpers shared by the template reader and the part writers.

mod escape;

pub use escape::{escape_xml, resolve_entity};
