//! Input file readers, one module per source format.

pub mod anthology;
pub mod extra;
pub mod mapping;
pub mod orderfile;
pub mod plenary;
pub mod registrants;

pub use mapping::{IdentifierMap, MappingTarget};
pub use plenary::PlenaryTable;
