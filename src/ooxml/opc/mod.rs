/// Open Packaging Conventions (OPC), write side.
///
/// A presentation is assembled as an in-memory [`OpcPackage`] of parts and
/// relationships and then serialized to a ZIP archive by [`PackageWriter`].

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgwriter;
pub mod rel;

pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::Part;
pub use pkgwriter::PackageWriter;
pub use rel::{Relationship, Relationships};
