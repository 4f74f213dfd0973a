//! Extra-metadata TSV files for items that are not in the anthology
//! (keynotes, tutorials, findings papers, late additions).
//!
//! Tab-separated with a header row. `id` and `title` are required; `authors`,
//! `affiliations` and `emails` are `;`-separated parallel lists.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::diagnostics::{Diagnostics, WarningKind};
use crate::error::{AgendaError, Result};
use crate::metadata::{MetadataStore, RejectedRecord};
use crate::models::{Author, ItemMetadata};
use crate::utils::{normalize_whitespace, split_list};

const REQUIRED_COLUMNS: &[&str] = &["id", "title"];

/// Column lookup over a header row, case-insensitive
pub(crate) struct Columns(HashMap<String, usize>);

impl Columns {
    pub(crate) fn new<'h>(headers: impl IntoIterator<Item = &'h str>) -> Self {
        Self(
            headers
                .into_iter()
                .enumerate()
                .map(|(idx, h)| (h.trim().to_lowercase(), idx))
                .collect(),
        )
    }

    pub(crate) fn has(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Index of the first alias present in the header
    pub(crate) fn find(&self, aliases: &[&str]) -> Option<usize> {
        aliases.iter().find_map(|a| self.0.get(*a).copied())
    }

    pub(crate) fn get<'r>(&self, record: &'r csv::StringRecord, name: &str) -> &'r str {
        self.0
            .get(name)
            .and_then(|idx| record.get(*idx))
            .unwrap_or("")
    }

    pub(crate) fn optional(&self, record: &csv::StringRecord, name: &str) -> Option<String> {
        Some(normalize_whitespace(self.get(record, name))).filter(|v| !v.is_empty())
    }
}

pub(crate) fn tsv_reader(text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(text.as_bytes())
}

pub(crate) fn csv_error(path: &Path, err: csv::Error) -> AgendaError {
    let line = err.position().map(|p| p.line() as usize).unwrap_or(0);
    AgendaError::parse(path, line, err.to_string())
}

pub fn load_file(
    event: &str,
    path: &Path,
    store: &mut MetadataStore,
    diag: &mut Diagnostics,
) -> Result<usize> {
    let text = crate::error::read_input(path)?;
    let count = load_str(event, &text, path, store, diag)?;
    debug!("Loaded {} extra records for {} from {}", count, event, path.display());
    Ok(count)
}

pub fn load_str(
    event: &str,
    text: &str,
    path: &Path,
    store: &mut MetadataStore,
    diag: &mut Diagnostics,
) -> Result<usize> {
    let mut reader = tsv_reader(text);
    let columns = Columns::new(reader.headers().map_err(|e| csv_error(path, e))?.iter());

    for required in REQUIRED_COLUMNS {
        if !columns.has(required) {
            return Err(AgendaError::parse(
                path,
                1,
                format!("missing required column '{}'", required),
            ));
        }
    }

    let mut count = 0;
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);

        let id = columns.get(&record, "id").trim();
        if id.is_empty() {
            diag.warn(
                WarningKind::SkippedRecord,
                format!("{}:{}: row without an id, skipped", path.display(), line),
            );
            continue;
        }

        let title = normalize_whitespace(columns.get(&record, "title"));
        if title.is_empty() {
            diag.warn(
                WarningKind::SkippedRecord,
                format!("{}:{}: item {} has no title", path.display(), line, id),
            );
            store.reject_extra(
                event,
                id.to_string(),
                RejectedRecord {
                    path: path.to_path_buf(),
                    line,
                    reason: "row has no title".into(),
                },
            );
            continue;
        }

        let metadata = ItemMetadata {
            title,
            authors: parse_authors(&columns, &record),
            abstract_text: normalize_whitespace(columns.get(&record, "abstract")),
            url: columns.optional(&record, "url"),
            pdf_url: columns.optional(&record, "pdf_url"),
            video_url: columns.optional(&record, "video_url"),
        };
        store.insert_extra(event, id.to_string(), metadata);
        count += 1;
    }

    Ok(count)
}

fn parse_authors(columns: &Columns, record: &csv::StringRecord) -> Vec<Author> {
    let names = split_list(columns.get(record, "authors"));
    let affiliations = split_list(columns.get(record, "affiliations"));
    let emails = split_list(columns.get(record, "emails"));

    names
        .into_iter()
        .enumerate()
        .filter(|(_, name)| !name.is_empty())
        .map(|(idx, name)| Author {
            name,
            first: None,
            last: None,
            affiliation: affiliations.get(idx).filter(|a| !a.is_empty()).cloned(),
            email: emails.get(idx).filter(|e| !e.is_empty()).cloned(),
        })
        .collect()
}
