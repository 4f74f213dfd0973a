//! XLSX output for the event app's import templates.
//!
//! Workbooks are rendered to memory first so that nothing touches the
//! filesystem until every workbook of a run has been produced.

use std::path::Path;

use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook, Worksheet, XlsxError};
use tracing::debug;

use crate::error::{AgendaError, Result};
use crate::models::{AgendaRow, Attendee};
use crate::roster::SpeakerRoster;

pub const AGENDA_SHEET: &str = "Agenda";
pub const SPEAKER_SHEET: &str = "Speaker";
pub const ATTENDEES_SHEET: &str = "Attendees";

pub const AGENDA_HEADERS: [&str; 12] = [
    "Date",
    "Start Time",
    "End Time",
    "Tracks",
    "Session Title",
    "Item Title",
    "Description",
    "Speakers",
    "Location",
    "PDF Link",
    "Video Link",
    "Session or Sub",
];
pub const SPEAKER_HEADERS: [&str; 3] = ["Name", "Email", "Affiliation"];
pub const ATTENDEE_HEADERS: [&str; 4] = ["Name", "Email", "Affiliation", "Registration Type"];

fn new_workbook() -> std::result::Result<Workbook, XlsxError> {
    // fixed timestamp keeps reruns byte-identical
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    let properties = DocProperties::new().set_creation_datetime(&created);

    let mut workbook = Workbook::new();
    workbook.set_properties(&properties);
    Ok(workbook)
}

fn write_sheet<const N: usize>(
    worksheet: &mut Worksheet,
    name: &str,
    headers: &[&str; N],
    rows: impl Iterator<Item = [String; N]>,
) -> std::result::Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    worksheet.set_name(name)?;

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    for (idx, cells) in rows.enumerate() {
        let row = idx as u32 + 1;
        for (col, value) in cells.iter().enumerate() {
            if !value.is_empty() {
                worksheet.write_string(row, col as u16, value)?;
            }
        }
    }
    Ok(())
}

fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Agenda + Speakers workbook as XLSX bytes
pub fn render_agenda(path: &Path, rows: &[AgendaRow], speakers: &SpeakerRoster) -> Result<Vec<u8>> {
    let render = || -> std::result::Result<Vec<u8>, XlsxError> {
        let mut workbook = new_workbook()?;

        write_sheet(
            workbook.add_worksheet(),
            AGENDA_SHEET,
            &AGENDA_HEADERS,
            rows.iter().map(|r| r.cells().map(str::to_string)),
        )?;
        write_sheet(
            workbook.add_worksheet(),
            SPEAKER_SHEET,
            &SPEAKER_HEADERS,
            speakers
                .iter()
                .map(|s| [s.name.clone(), cell(&s.email), cell(&s.affiliation)]),
        )?;

        workbook.save_to_buffer()
    };

    let bytes = render().map_err(|e| AgendaError::spreadsheet(path, e))?;
    debug!(
        "Rendered {} agenda rows and {} speakers for {}",
        rows.len(),
        speakers.len(),
        path.display()
    );
    Ok(bytes)
}

/// Attendees workbook as XLSX bytes
pub fn render_attendees(path: &Path, attendees: &[Attendee]) -> Result<Vec<u8>> {
    let render = || -> std::result::Result<Vec<u8>, XlsxError> {
        let mut workbook = new_workbook()?;
        write_sheet(
            workbook.add_worksheet(),
            ATTENDEES_SHEET,
            &ATTENDEE_HEADERS,
            attendees.iter().map(|a| {
                [
                    a.name.clone(),
                    cell(&a.email),
                    cell(&a.affiliation),
                    cell(&a.registration_type),
                ]
            }),
        )?;
        workbook.save_to_buffer()
    };

    render().map_err(|e| AgendaError::spreadsheet(path, e))
}

pub fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|e| AgendaError::io(path, e))
}
