//! Layered metadata lookups.
//!
//! Anthology records are keyed by anthology ID, extra-metadata records by
//! `(event, local ID)`. Records rejected during loading are remembered so
//! that an order file referencing one fails loudly instead of producing a
//! blank agenda entry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::diagnostics::Diagnostics;
use crate::error::{AgendaError, Result};
use crate::loaders::mapping::{IdentifierMap, MappingTarget};
use crate::loaders::{anthology, extra};
use crate::models::ItemMetadata;

/// Input record that was dropped while loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub path: PathBuf,
    pub line: usize,
    pub reason: String,
}

/// Outcome of looking up an agenda item
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedMetadata<'a> {
    AnthologySourced {
        anthology_id: &'a str,
        metadata: &'a ItemMetadata,
    },
    ExtraMetadataSourced(&'a ItemMetadata),
    Unresolved,
}

impl<'a> ResolvedMetadata<'a> {
    pub fn metadata(&self) -> Option<&'a ItemMetadata> {
        match *self {
            ResolvedMetadata::AnthologySourced { metadata, .. } => Some(metadata),
            ResolvedMetadata::ExtraMetadataSourced(metadata) => Some(metadata),
            ResolvedMetadata::Unresolved => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct MetadataStore {
    anthology: HashMap<String, ItemMetadata>,
    extra: HashMap<(String, String), ItemMetadata>,
    rejected_anthology: HashMap<String, RejectedRecord>,
    rejected_extra: HashMap<(String, String), RejectedRecord>,
}

impl MetadataStore {
    /// Load every anthology XML file and every event's extra-metadata TSV.
    pub fn from_files<'p>(
        xml_files: &[PathBuf],
        extra_files: impl IntoIterator<Item = (&'p str, &'p Path)>,
        diag: &mut Diagnostics,
    ) -> Result<Self> {
        let mut store = Self::default();

        for path in xml_files {
            anthology::load_file(path, &mut store, diag)?;
        }
        for (event, path) in extra_files {
            extra::load_file(event, path, &mut store, diag)?;
        }

        info!(
            "Loaded metadata: {} anthology records, {} extra records",
            store.anthology.len(),
            store.extra.len()
        );
        Ok(store)
    }

    pub fn insert_anthology(&mut self, id: String, metadata: ItemMetadata) {
        self.rejected_anthology.remove(&id);
        self.anthology.insert(id, metadata);
    }

    pub fn insert_extra(&mut self, event: &str, local_id: String, metadata: ItemMetadata) {
        let key = (event.to_string(), local_id);
        self.rejected_extra.remove(&key);
        self.extra.insert(key, metadata);
    }

    pub fn reject_anthology(&mut self, id: String, record: RejectedRecord) {
        if !self.anthology.contains_key(&id) {
            self.rejected_anthology.insert(id, record);
        }
    }

    pub fn reject_extra(&mut self, event: &str, local_id: String, record: RejectedRecord) {
        let key = (event.to_string(), local_id);
        if !self.extra.contains_key(&key) {
            self.rejected_extra.insert(key, record);
        }
    }

    pub fn anthology(&self, id: &str) -> Option<&ItemMetadata> {
        self.anthology.get(id)
    }

    pub fn extra(&self, event: &str, local_id: &str) -> Option<&ItemMetadata> {
        self.extra.get(&(event.to_string(), local_id.to_string()))
    }

    pub fn rejected_anthology(&self, id: &str) -> Option<&RejectedRecord> {
        self.rejected_anthology.get(id)
    }

    pub fn rejected_extra(&self, event: &str, local_id: &str) -> Option<&RejectedRecord> {
        self.rejected_extra
            .get(&(event.to_string(), local_id.to_string()))
    }

    /// Resolve an order-file ID through the event's mapping.
    ///
    /// Anthology-mapped IDs fall back to the extra lookup when the anthology
    /// has no record. Referencing a rejected record is a hard error.
    pub fn resolve<'a>(
        &'a self,
        event: &str,
        local_id: &str,
        mapping: &'a IdentifierMap,
    ) -> Result<ResolvedMetadata<'a>> {
        if let Some(MappingTarget::Anthology(anthology_id)) = mapping.get(local_id) {
            if let Some(metadata) = self.anthology.get(anthology_id) {
                return Ok(ResolvedMetadata::AnthologySourced {
                    anthology_id,
                    metadata,
                });
            }
            if let Some(rejected) = self.rejected_anthology.get(anthology_id) {
                return Err(rejected_error(event, local_id, rejected));
            }
        }

        if let Some(metadata) = self.extra(event, local_id) {
            return Ok(ResolvedMetadata::ExtraMetadataSourced(metadata));
        }
        if let Some(rejected) = self.rejected_extra(event, local_id) {
            return Err(rejected_error(event, local_id, rejected));
        }

        Ok(ResolvedMetadata::Unresolved)
    }
}

fn rejected_error(event: &str, local_id: &str, rejected: &RejectedRecord) -> AgendaError {
    AgendaError::parse(
        &rejected.path,
        rejected.line,
        format!(
            "item '{}' of event '{}' is on the agenda but its record was rejected: {}",
            local_id, event, rejected.reason
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str) -> ItemMetadata {
        ItemMetadata {
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn mapping(text: &str) -> IdentifierMap {
        IdentifierMap::parse(text, Path::new("map.tsv")).unwrap()
    }

    #[test]
    fn test_resolve_anthology_then_extra() {
        let mut store = MetadataStore::default();
        store.insert_anthology("N19-1001".into(), item("From anthology"));
        store.insert_extra("main", "2".into(), item("From extra"));
        store.insert_extra("main", "3".into(), item("Fallback"));
        let map = mapping("1 N19-1001\n2 none\n3 N19-9999\n4 none\n");

        match store.resolve("main", "1", &map).unwrap() {
            ResolvedMetadata::AnthologySourced { anthology_id, metadata } => {
                assert_eq!(anthology_id, "N19-1001");
                assert_eq!(metadata.title, "From anthology");
            }
            other => panic!("unexpected resolution: {:?}", other),
        }
        assert_eq!(
            store.resolve("main", "2", &map).unwrap(),
            ResolvedMetadata::ExtraMetadataSourced(&item("From extra"))
        );
        assert_eq!(
            store.resolve("main", "3", &map).unwrap().metadata().map(|m| m.title.as_str()),
            Some("Fallback")
        );
        assert_eq!(
            store.resolve("main", "4", &map).unwrap(),
            ResolvedMetadata::Unresolved
        );
        // extra lookups are scoped to the event
        assert_eq!(
            store.resolve("BEA", "2", &map).unwrap(),
            ResolvedMetadata::Unresolved
        );
    }

    #[test]
    fn test_resolving_rejected_record_is_parse_error() {
        let mut store = MetadataStore::default();
        store.reject_anthology(
            "N19-1002".into(),
            RejectedRecord {
                path: PathBuf::from("N19.xml"),
                line: 40,
                reason: "record has no title".into(),
            },
        );
        let map = mapping("5 N19-1002\n");

        let err = store.resolve("main", "5", &map).unwrap_err();
        assert!(matches!(err, AgendaError::Parse { line: 40, .. }));
    }

    #[test]
    fn test_later_record_clears_rejection() {
        let mut store = MetadataStore::default();
        store.reject_extra(
            "BEA",
            "9".into(),
            RejectedRecord {
                path: PathBuf::from("bea.tsv"),
                line: 3,
                reason: "empty title".into(),
            },
        );
        store.insert_extra("BEA", "9".into(), item("Fixed in a later row"));
        assert!(store.rejected_extra("BEA", "9").is_none());
    }
}
