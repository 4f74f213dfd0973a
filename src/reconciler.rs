//! Splits registrants into speakers and everyone else.
//!
//! A registrant is a speaker when their email matches a speaker's email or
//! their normalized name matches a speaker's name. Name-only matches are
//! still excluded from the attendee list, since the app links people by
//! name, but they are reported for review.

use std::collections::HashSet;

use tracing::debug;

use crate::diagnostics::{Diagnostics, WarningKind};
use crate::models::{Attendee, Registrant};
use crate::roster::SpeakerRoster;

/// Attendees in registrant order. Speakers that matched a registrant by
/// name pick up the registrant's email and affiliation where they had none.
pub fn reconcile(
    registrants: &[Registrant],
    speakers: &mut SpeakerRoster,
    diag: &mut Diagnostics,
) -> Vec<Attendee> {
    let mut speaker_emails = speakers.email_keys();
    let mut seen: HashSet<(String, Option<String>)> = HashSet::new();
    let mut attendees = Vec::new();
    let mut matched = 0;

    for registrant in registrants {
        let key = registrant.key();
        let email = registrant.email_key();

        if email.as_ref().is_some_and(|e| speaker_emails.contains(e)) {
            matched += 1;
            continue;
        }

        if let Some(speaker) = speakers.get_mut(&key) {
            matched += 1;
            match speaker.email_key() {
                Some(known) if Some(&known) == email.as_ref() => {}
                known => {
                    diag.warn(
                        WarningKind::NameOnlyMatch,
                        format!(
                            "registrant '{}' (row {}) matches speaker '{}' by name only",
                            registrant.name, registrant.row, speaker.name
                        ),
                    );
                    if known.is_none() {
                        speaker.email = registrant.email.clone();
                        speaker_emails.extend(email.clone());
                        if speaker.affiliation.is_none() {
                            speaker.affiliation = registrant.affiliation.clone();
                        }
                    }
                }
            }
            continue;
        }

        if !seen.insert((key, email)) {
            diag.warn(
                WarningKind::DuplicateRegistrant,
                format!(
                    "registrant '{}' (row {}) is listed more than once",
                    registrant.name, registrant.row
                ),
            );
            continue;
        }

        attendees.push(Attendee::from(registrant));
    }

    debug!(
        "{} registrants matched speakers, {} attendees remain",
        matched,
        attendees.len()
    );
    attendees
}
