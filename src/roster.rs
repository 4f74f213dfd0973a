//! Speaker roster: every person credited on the agenda, deduplicated by
//! normalized name and kept in first-seen order.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::diagnostics::{Diagnostics, WarningKind};
use crate::models::Speaker;
use crate::utils::{normalize_name, normalize_whitespace};

#[derive(Debug, Default)]
pub struct SpeakerRoster {
    speakers: IndexMap<String, Speaker>,
    /// (name key, lowercased affiliation) pairs already reported
    reported: HashSet<(String, String)>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(normalize_whitespace).filter(|v| !v.is_empty())
}

impl SpeakerRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sighting of a speaker.
    ///
    /// The first sighting fixes the displayed name and affiliation. Later
    /// sightings only fill in blanks; a different affiliation is reported
    /// once per distinct value.
    pub fn add(
        &mut self,
        name: &str,
        affiliation: Option<&str>,
        email: Option<&str>,
        diag: &mut Diagnostics,
    ) {
        let key = normalize_name(name);
        if key.is_empty() {
            return;
        }
        let affiliation = non_empty(affiliation);
        let email = non_empty(email);

        let Some(existing) = self.speakers.get_mut(&key) else {
            self.speakers.insert(
                key,
                Speaker {
                    name: normalize_whitespace(name),
                    email,
                    affiliation,
                },
            );
            return;
        };

        if let Some(new) = affiliation {
            match existing.affiliation.clone() {
                None => existing.affiliation = Some(new),
                Some(current) if current.to_lowercase() != new.to_lowercase() => {
                    if self.reported.insert((key, new.to_lowercase())) {
                        diag.warn(
                            WarningKind::AffiliationConflict,
                            format!(
                                "speaker '{}' listed with affiliation '{}' and '{}', keeping '{}'",
                                existing.name, current, new, current
                            ),
                        );
                    }
                }
                Some(_) => {}
            }
        }

        if existing.email.is_none() {
            existing.email = email;
        }
    }

    pub fn get(&self, name: &str) -> Option<&Speaker> {
        self.speakers.get(&normalize_name(name))
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Speaker> {
        self.speakers.get_mut(key)
    }

    /// Normalized emails of every speaker that has one
    pub fn email_keys(&self) -> HashSet<String> {
        self.speakers
            .values()
            .filter_map(Speaker::email_key)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Speaker> {
        self.speakers.values()
    }

    pub fn len(&self) -> usize {
        self.speakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }
}
