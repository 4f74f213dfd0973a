pub mod assembler;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod loaders;
pub mod metadata;
pub mod models;
pub mod pipeline;
pub mod reconciler;
pub mod roster;
pub mod utils;
pub mod writer;

// Re-export commonly used items
pub use config::Config;
pub use diagnostics::{Diagnostics, Warning, WarningKind};
pub use error::{AgendaError, Result};
pub use models::{AgendaRow, Attendee, Registrant, RowKind, Speaker};
pub use pipeline::{generate, run, Output};
pub use roster::SpeakerRoster;
