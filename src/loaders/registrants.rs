//! Registrant spreadsheet as exported by the registration system.
//!
//! Spreadsheets (`.xlsx`, `.xls`, `.ods`) are read from their first sheet;
//! `.csv` and `.tsv` exports are read as delimited text. Either way the
//! first row is the header.

use std::path::Path;

use calamine::{open_workbook_auto, Reader};
use tracing::debug;

use crate::diagnostics::{Diagnostics, WarningKind};
use crate::error::{read_input, AgendaError, Result};
use crate::loaders::extra::{csv_error, Columns};
use crate::models::Registrant;
use crate::utils::normalize_whitespace;

const NAME_COLUMNS: &[&str] = &["professional name", "name", "full name"];
const EMAIL_COLUMNS: &[&str] = &["email", "e-mail", "email address"];
const AFFILIATION_COLUMNS: &[&str] = &["affiliation", "organization", "company"];
const TYPE_COLUMNS: &[&str] = &["registration type", "ticket type", "ticket"];

pub fn load_file(path: &Path, diag: &mut Diagnostics) -> Result<Vec<Registrant>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let rows = match extension.as_str() {
        "csv" => delimited_rows(&read_input(path)?, b',', path)?,
        "tsv" | "txt" => delimited_rows(&read_input(path)?, b'\t', path)?,
        _ => workbook_rows(path)?,
    };

    let registrants = from_rows(rows, path, diag)?;
    debug!("Loaded {} registrants from {}", registrants.len(), path.display());
    Ok(registrants)
}

fn delimited_rows(text: &str, delimiter: u8, path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    reader
        .records()
        .map(|record| {
            record
                .map(|r| r.iter().map(str::to_string).collect())
                .map_err(|e| csv_error(path, e))
        })
        .collect()
}

fn workbook_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| AgendaError::spreadsheet(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AgendaError::spreadsheet(path, "workbook has no sheets"))?
        .map_err(|e| AgendaError::spreadsheet(path, e))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect())
}

/// Turn header + data rows into registrants. Row numbers are 1-based and
/// count the header.
pub fn from_rows(
    rows: Vec<Vec<String>>,
    path: &Path,
    diag: &mut Diagnostics,
) -> Result<Vec<Registrant>> {
    let mut rows = rows.into_iter();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let columns = Columns::new(header.iter().map(String::as_str));

    let name_col = columns.find(NAME_COLUMNS).ok_or_else(|| {
        AgendaError::parse(
            path,
            1,
            format!("no name column (expected one of: {})", NAME_COLUMNS.join(", ")),
        )
    })?;
    let email_col = columns.find(EMAIL_COLUMNS);
    let affiliation_col = columns.find(AFFILIATION_COLUMNS);
    let type_col = columns.find(TYPE_COLUMNS);

    let cell = |row: &[String], col: Option<usize>| -> Option<String> {
        col.and_then(|c| row.get(c))
            .map(|v| normalize_whitespace(v))
            .filter(|v| !v.is_empty())
    };

    let mut registrants = Vec::new();
    for (idx, row) in rows.enumerate() {
        let row_number = idx + 2;
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }

        let Some(name) = cell(&row, Some(name_col)) else {
            diag.warn(
                WarningKind::SkippedRecord,
                format!("{}: row {} has no name, skipped", path.display(), row_number),
            );
            continue;
        };

        registrants.push(Registrant {
            name,
            email: cell(&row, email_col),
            affiliation: cell(&row, affiliation_col),
            registration_type: cell(&row, type_col),
            row: row_number,
        });
    }

    Ok(registrants)
}
