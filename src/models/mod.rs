pub mod agenda;
pub mod metadata;
pub mod order;
pub mod person;

pub use agenda::*;
pub use metadata::*;
pub use order::*;
pub use person::*;
