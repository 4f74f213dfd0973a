//! Agenda assembly.
//!
//! Walks every event's schedule in configuration order and turns sessions
//! and items into agenda rows, filling item rows from the metadata store
//! and collecting every credited person into the speaker roster.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::config::{Config, ExtraSession, SpeakerOverride};
use crate::diagnostics::{Diagnostics, WarningKind};
use crate::error::Result;
use crate::loaders::{IdentifierMap, PlenaryTable};
use crate::metadata::{MetadataStore, ResolvedMetadata};
use crate::models::{
    AgendaRow, Author, EventSchedule, ItemMetadata, OrderEntry, RowKind, ScheduledSession,
    SessionType,
};
use crate::roster::SpeakerRoster;
use crate::utils::{item_track, research_session_tracks};

const DATE_FORMAT: &str = "%m/%d/%Y";
const TIME_FORMAT: &str = "%H:%M";

/// Agenda rows plus the speakers credited in them
#[derive(Debug, Default)]
pub struct Assembly {
    pub rows: Vec<AgendaRow>,
    pub speakers: SpeakerRoster,
}

pub struct Assembler<'a> {
    config: &'a Config,
    store: &'a MetadataStore,
    mappings: &'a HashMap<String, IdentifierMap>,
    plenary: &'a PlenaryTable,
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn format_time(time: Option<NaiveTime>) -> String {
    time.map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

fn link(enabled: bool, url: Option<&String>) -> String {
    match url {
        Some(url) if enabled => url.clone(),
        _ => String::new(),
    }
}

impl<'a> Assembler<'a> {
    pub fn new(
        config: &'a Config,
        store: &'a MetadataStore,
        mappings: &'a HashMap<String, IdentifierMap>,
        plenary: &'a PlenaryTable,
    ) -> Self {
        Self {
            config,
            store,
            mappings,
            plenary,
        }
    }

    pub fn assemble(&self, schedules: &[EventSchedule], diag: &mut Diagnostics) -> Result<Assembly> {
        let mut assembly = Assembly::default();

        for schedule in schedules {
            let before = assembly.rows.len();
            for session in &schedule.sessions {
                self.session_rows(&schedule.event, session, &mut assembly, diag)?;
            }
            debug!(
                "Assembled {} rows for {}",
                assembly.rows.len() - before,
                schedule.event
            );
        }

        assembly
            .rows
            .extend(self.config.extra_sessions.iter().map(extra_session_row));

        validate_rows(&assembly.rows, diag);
        Ok(assembly)
    }

    fn is_main(&self, event: &str) -> bool {
        event == self.config.main_event
    }

    fn session_rows(
        &self,
        event: &str,
        session: &ScheduledSession,
        assembly: &mut Assembly,
        diag: &mut Diagnostics,
    ) -> Result<()> {
        let header = &session.header;
        let title = session.title();

        if header.session_type != SessionType::Tutorial {
            let mut row = AgendaRow {
                date: format_date(header.date),
                start: format_time(header.start),
                end: format_time(header.end),
                tracks: self.session_tracks(event, session),
                session_title: self.display_title(event, header, title),
                location: header.room.clone().unwrap_or_default(),
                kind: RowKind::Session,
                ..Default::default()
            };

            match header.session_type {
                SessionType::Paper | SessionType::BestPaper => {
                    if let Some(chair) = &header.chair {
                        row.description = format!("Chair: {}", chair);
                    }
                }
                SessionType::Plenary => self.overlay_plenary(&mut row, title, assembly, diag),
                _ => {}
            }
            assembly.rows.push(row);
        }

        let parent_title = self.display_title(event, header, title);
        for item in &session.items {
            let row = self.item_row(event, &parent_title, item, &mut assembly.speakers, diag)?;
            assembly.rows.push(row);
        }
        Ok(())
    }

    /// Session IDs prefix paper and poster session titles in the main event
    fn display_title(&self, event: &str, header: &OrderEntry, title: &str) -> String {
        match &header.session_id {
            Some(id) if self.is_main(event) && header.session_type.is_research() => {
                format!("{}: {}", id, title)
            }
            _ => title.to_string(),
        }
    }

    fn session_tracks(&self, event: &str, session: &ScheduledSession) -> String {
        if !self.is_main(event) {
            return event.to_string();
        }
        if session.header.session_type.is_research() {
            research_session_tracks(session.items.iter().filter_map(|i| i.local_id.as_deref()))
        } else {
            String::new()
        }
    }

    fn overlay_plenary(
        &self,
        row: &mut AgendaRow,
        title: &str,
        assembly: &mut Assembly,
        diag: &mut Diagnostics,
    ) {
        let Some(info) = self.plenary.lookup(title) else {
            return;
        };

        row.description = info.abstract_text.clone();
        row.speakers = info.person.clone();
        row.pdf_url = link(self.config.pdf_links, info.pdf_url.as_ref());
        row.video_url = link(self.config.video_links, info.video_url.as_ref());

        assembly.speakers.add(
            &info.person,
            info.person_affiliation.as_deref(),
            info.person_email.as_deref(),
            diag,
        );
    }

    fn item_row(
        &self,
        event: &str,
        parent_title: &str,
        item: &OrderEntry,
        speakers: &mut SpeakerRoster,
        diag: &mut Diagnostics,
    ) -> Result<AgendaRow> {
        let local_id = item.local_id.as_deref().unwrap_or("");
        let is_tutorial = item.session_type == SessionType::Tutorial;

        let mut row = AgendaRow {
            date: format_date(item.date),
            start: format_time(item.start),
            end: format_time(item.end),
            tracks: item_track(event, &self.config.main_event, local_id),
            session_title: parent_title.to_string(),
            location: item.room.clone().unwrap_or_default(),
            kind: if is_tutorial { RowKind::Session } else { RowKind::Sub },
            ..Default::default()
        };

        let resolved = match self.mappings.get(event) {
            Some(mapping) => self.store.resolve(event, local_id, mapping)?,
            None => ResolvedMetadata::Unresolved,
        };

        let Some(metadata) = resolved.metadata() else {
            diag.warn(
                WarningKind::MissingMetadata,
                format!(
                    "no metadata for item '{}' of event '{}' (order file line {})",
                    local_id, event, item.line
                ),
            );
            return Ok(row);
        };

        let authors = apply_overrides(metadata, &self.config.speaker_overrides);
        for author in &authors {
            speakers.add(
                &author.name,
                author.affiliation.as_deref(),
                author.email.as_deref(),
                diag,
            );
        }

        row.item_title = metadata.title.clone();
        if is_tutorial && !metadata.title.is_empty() {
            row.session_title = metadata.title.clone();
        }
        row.description = metadata.abstract_text.clone();
        row.speakers = authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        row.pdf_url = link(self.config.pdf_links, metadata.pdf_url.as_ref());
        row.video_url = link(self.config.video_links, metadata.video_url.as_ref());

        Ok(row)
    }
}

/// Authors of an item with configured display-name overrides applied
fn apply_overrides(metadata: &ItemMetadata, overrides: &[SpeakerOverride]) -> Vec<Author> {
    metadata
        .authors
        .iter()
        .map(|author| {
            let renamed = overrides
                .iter()
                .find(|o| o.title == metadata.title && o.name == author.name);
            match renamed {
                Some(o) => Author {
                    name: o.display_name.clone(),
                    ..author.clone()
                },
                None => author.clone(),
            }
        })
        .collect()
}

fn extra_session_row(extra: &ExtraSession) -> AgendaRow {
    let clock = |value: &str| {
        NaiveTime::parse_from_str(value, TIME_FORMAT)
            .map(|t| t.format(TIME_FORMAT).to_string())
            .unwrap_or_else(|_| value.to_string())
    };

    AgendaRow {
        date: extra.date.clone(),
        start: clock(&extra.start),
        end: clock(&extra.end),
        session_title: extra.title.clone(),
        location: extra.room.clone(),
        kind: RowKind::Session,
        ..Default::default()
    }
}

/// Report rows the app would refuse to import. Row numbers are sheet rows,
/// counting the header.
fn validate_rows(rows: &[AgendaRow], diag: &mut Diagnostics) {
    let invalid: Vec<String> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| !row.has_required_fields())
        .map(|(idx, _)| (idx + 2).to_string())
        .collect();

    if !invalid.is_empty() {
        diag.warn(
            WarningKind::MissingRequiredField,
            format!(
                "{} agenda rows are missing a date, time or session title: rows {}",
                invalid.len(),
                invalid.join(", ")
            ),
        );
    }
}
