//! Hard errors that abort a run.
//!
//! Anything recoverable goes through [`crate::diagnostics::Diagnostics`]
//! instead; an `AgendaError` means the output can no longer be trusted.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgendaError {
    /// Missing or inconsistent configuration, including bad mapping files
    #[error("Configuration error: {0}")]
    Config(String),

    /// Structurally invalid required input. `line` is 0 when the problem
    /// concerns the file as a whole.
    #[error("Parse error in {}:{}: {}", .path.display(), .line, .message)]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Input file could not be read
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Spreadsheet could not be read or written
    #[error("Spreadsheet error in {}: {}", .path.display(), .message)]
    Spreadsheet { path: PathBuf, message: String },
}

impl AgendaError {
    pub fn parse(path: &Path, line: usize, message: impl Into<String>) -> Self {
        AgendaError::Parse {
            path: path.to_path_buf(),
            line,
            message: message.into(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        AgendaError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn spreadsheet(path: &Path, message: impl ToString) -> Self {
        AgendaError::Spreadsheet {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AgendaError>;

/// Read a whole input file, tagging failures with the path.
pub fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| AgendaError::io(path, e))
}
