//! JSON run configuration.
//!
//! Event-keyed tables keep their key order from the file; that order is the
//! order events appear in the agenda.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{read_input, AgendaError, Result};

fn default_main_event() -> String {
    "main".to_string()
}

/// Rename one author on one item, to tell apart people sharing a name
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SpeakerOverride {
    /// Exact item title the override applies to
    pub title: String,
    pub name: String,
    pub display_name: String,
}

/// Session row added after all events (shared breaks, meals)
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExtraSession {
    /// `MM/DD/YYYY`
    pub date: String,
    pub start: String,
    pub end: String,
    pub title: String,
    #[serde(default)]
    pub room: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub order_files: IndexMap<String, PathBuf>,
    pub mapping_files: IndexMap<String, PathBuf>,
    #[serde(default)]
    pub extra_metadata_files: IndexMap<String, PathBuf>,
    #[serde(default)]
    pub xml_files: Vec<PathBuf>,
    pub plenary_info_file: Option<PathBuf>,
    pub attendees_file: Option<PathBuf>,
    #[serde(default)]
    pub pdf_links: bool,
    #[serde(default)]
    pub video_links: bool,
    /// Event whose item tracks come from ID suffixes
    #[serde(default = "default_main_event")]
    pub main_event: String,
    #[serde(default)]
    pub speaker_overrides: Vec<SpeakerOverride>,
    #[serde(default)]
    pub extra_sessions: Vec<ExtraSession>,
}

impl Config {
    /// Load, resolve relative paths against the file's directory, validate.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = read_input(path).map_err(|e| {
            AgendaError::Config(format!("cannot read config file {}: {}", path.display(), e))
        })?;
        let mut config: Config = serde_json::from_str(&text).map_err(|e| {
            AgendaError::Config(format!("invalid configuration in {}: {}", path.display(), e))
        })?;
        config.validate()?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Parse and validate configuration text. Paths are left as written.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)
            .map_err(|e| AgendaError::Config(format!("invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.order_files.is_empty() {
            return Err(AgendaError::Config("no order files configured".into()));
        }

        for event in self.order_files.keys() {
            if !self.mapping_files.contains_key(event) {
                return Err(AgendaError::Config(format!(
                    "event '{}' has an order file but no mapping file",
                    event
                )));
            }
        }

        for (table, keys) in [
            ("mapping_files", self.mapping_files.keys()),
            ("extra_metadata_files", self.extra_metadata_files.keys()),
        ] {
            for event in keys {
                if !self.order_files.contains_key(event) {
                    return Err(AgendaError::Config(format!(
                        "event '{}' in {} has no order file",
                        event, table
                    )));
                }
            }
        }

        for extra in &self.extra_sessions {
            NaiveDate::parse_from_str(&extra.date, "%m/%d/%Y").map_err(|_| {
                AgendaError::Config(format!(
                    "extra session '{}' has invalid date '{}' (expected MM/DD/YYYY)",
                    extra.title, extra.date
                ))
            })?;
            for time in [&extra.start, &extra.end] {
                NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| {
                    AgendaError::Config(format!(
                        "extra session '{}' has invalid time '{}' (expected HH:MM)",
                        extra.title, time
                    ))
                })?;
            }
        }

        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        self.order_files.values_mut().for_each(resolve);
        self.mapping_files.values_mut().for_each(resolve);
        self.extra_metadata_files.values_mut().for_each(resolve);
        self.xml_files.iter_mut().for_each(resolve);
        self.plenary_info_file.iter_mut().for_each(resolve);
        self.attendees_file.iter_mut().for_each(resolve);
    }

    /// Events in configuration order
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.order_files.keys().map(String::as_str)
    }
}
