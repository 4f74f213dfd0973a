//! Soft-warning ledger.
//!
//! Warnings never stop a run. They are logged as they happen and counted
//! so the binary can print a summary once both workbooks are written.

use std::collections::BTreeMap;
use std::fmt;

use tracing::warn;

/// Category of a recoverable problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WarningKind {
    /// Agenda item whose metadata could not be found
    MissingMetadata,
    /// Input record skipped because it was incomplete
    SkippedRecord,
    /// Same speaker credited with different affiliations
    AffiliationConflict,
    /// Registrant excluded because only the name matched a speaker
    NameOnlyMatch,
    /// Start times within a session go backwards
    OutOfOrderTime,
    /// Agenda row without date, times or session title
    MissingRequiredField,
    /// Same registrant listed more than once
    DuplicateRegistrant,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WarningKind::MissingMetadata => "missing metadata",
            WarningKind::SkippedRecord => "skipped records",
            WarningKind::AffiliationConflict => "affiliation conflicts",
            WarningKind::NameOnlyMatch => "name-only attendee matches",
            WarningKind::OutOfOrderTime => "out-of-order session times",
            WarningKind::MissingRequiredField => "rows missing required fields",
            WarningKind::DuplicateRegistrant => "duplicate registrants",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, kind: WarningKind, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.warnings.push(Warning { kind, message });
    }

    pub fn count(&self, kind: WarningKind) -> usize {
        self.warnings.iter().filter(|w| w.kind == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Warning counts per kind, in a stable order.
    pub fn summary(&self) -> BTreeMap<WarningKind, usize> {
        let mut counts = BTreeMap::new();
        for warning in &self.warnings {
            *counts.entry(warning.kind).or_insert(0) += 1;
        }
        counts
    }
}
