use crate::utils::{normalize_email, normalize_name};

/// Speaker sheet record, one per normalized name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speaker {
    /// Name as first seen in the agenda
    pub name: String,
    pub email: Option<String>,
    pub affiliation: Option<String>,
}

impl Speaker {
    pub fn email_key(&self) -> Option<String> {
        self.email.as_deref().map(normalize_email).filter(|e| !e.is_empty())
    }
}

/// One row of the registrant spreadsheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registrant {
    pub name: String,
    pub email: Option<String>,
    pub affiliation: Option<String>,
    pub registration_type: Option<String>,
    /// 1-based row in the source sheet, header included
    pub row: usize,
}

impl Registrant {
    pub fn key(&self) -> String {
        normalize_name(&self.name)
    }

    pub fn email_key(&self) -> Option<String> {
        self.email.as_deref().map(normalize_email).filter(|e| !e.is_empty())
    }
}

/// Attendee sheet record: a registrant who is not a speaker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    pub name: String,
    pub email: Option<String>,
    pub affiliation: Option<String>,
    pub registration_type: Option<String>,
}

impl From<&Registrant> for Attendee {
    fn from(r: &Registrant) -> Self {
        Self {
            name: r.name.clone(),
            email: r.email.clone(),
            affiliation: r.affiliation.clone(),
            registration_type: r.registration_type.clone(),
        }
    }
}
