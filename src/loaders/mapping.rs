//! Order-file ID to anthology ID mapping tables.
//!
//! One mapping per line: `<local-id> <anthology-id>`, or `<local-id> none`
//! for items that only exist in an extra-metadata file.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::error::{AgendaError, Result};

/// Second-column value marking a non-anthology item
pub const NON_ANTHOLOGY_SENTINEL: &str = "none";

/// Where the metadata for a local ID lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingTarget {
    Anthology(String),
    ExtraMetadata,
}

#[derive(Debug, Clone, Default)]
pub struct IdentifierMap {
    entries: HashMap<String, MappingTarget>,
}

impl IdentifierMap {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AgendaError::Config(format!("cannot read mapping file {}: {}", path.display(), e))
        })?;
        let map = Self::parse(&text, path)?;
        debug!("Loaded {} mappings from {}", map.len(), path.display());
        Ok(map)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let mut entries = HashMap::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            let &[local_id, target] = &fields[..] else {
                return Err(AgendaError::Config(format!(
                    "{}:{}: expected '<local-id> <anthology-id|{}>', found {} field(s)",
                    path.display(),
                    idx + 1,
                    NON_ANTHOLOGY_SENTINEL,
                    fields.len()
                )));
            };

            let target = if target.eq_ignore_ascii_case(NON_ANTHOLOGY_SENTINEL) {
                MappingTarget::ExtraMetadata
            } else {
                MappingTarget::Anthology(target.to_string())
            };

            match entries.get(local_id) {
                Some(existing) if *existing != target => {
                    return Err(AgendaError::Config(format!(
                        "{}:{}: local id '{}' is mapped more than once",
                        path.display(),
                        idx + 1,
                        local_id
                    )));
                }
                Some(_) => {}
                None => {
                    entries.insert(local_id.to_string(), target);
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn get(&self, local_id: &str) -> Option<&MappingTarget> {
        self.entries.get(local_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
