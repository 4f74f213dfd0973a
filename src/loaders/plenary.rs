//! Additional text for plenary sessions (keynotes, panels, business
//! meetings). Rows are keyed by a session-title prefix and matched in file
//! order.

use std::path::Path;

use tracing::debug;

use crate::error::{read_input, AgendaError, Result};
use crate::loaders::extra::{csv_error, tsv_reader, Columns};
use crate::models::PlenaryInfo;
use crate::utils::normalize_whitespace;

#[derive(Debug, Clone, Default)]
pub struct PlenaryTable {
    entries: Vec<PlenaryInfo>,
}

impl PlenaryTable {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = read_input(path)?;
        let table = Self::parse(&text, path)?;
        debug!("Loaded {} plenary entries from {}", table.entries.len(), path.display());
        Ok(table)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let mut reader = tsv_reader(text);
        let columns = Columns::new(reader.headers().map_err(|e| csv_error(path, e))?.iter());
        if !columns.has("session") {
            return Err(AgendaError::parse(path, 1, "missing required column 'session'"));
        }

        let mut entries = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| csv_error(path, e))?;
            let prefix = normalize_whitespace(columns.get(&record, "session"));
            if prefix.is_empty() {
                continue;
            }

            entries.push(PlenaryInfo {
                session_prefix: prefix,
                abstract_text: normalize_whitespace(columns.get(&record, "abstract")),
                person: normalize_whitespace(columns.get(&record, "person")),
                person_affiliation: columns.optional(&record, "person_affiliation"),
                person_email: columns.optional(&record, "person_email"),
                pdf_url: columns.optional(&record, "pdf_url"),
                video_url: columns.optional(&record, "video_url"),
            });
        }

        Ok(Self { entries })
    }

    /// First entry whose prefix starts the session title
    pub fn lookup(&self, session_title: &str) -> Option<&PlenaryInfo> {
        self.entries
            .iter()
            .find(|info| session_title.starts_with(&info.session_prefix))
    }
}
