/// Author or speaker credited on an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// Display form, given name first
    pub name: String,
    /// Given name, when the source separates it
    pub first: Option<String>,
    /// Family name, when the source separates it
    pub last: Option<String>,
    pub affiliation: Option<String>,
    /// Only known for non-anthology items and plenary speakers
    pub email: Option<String>,
}

impl Author {
    pub fn new(name: impl Into<String>, affiliation: Option<String>) -> Self {
        Self {
            name: name.into(),
            first: None,
            last: None,
            affiliation,
            email: None,
        }
    }
}

/// Bibliographic record for one agenda item
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemMetadata {
    pub title: String,
    pub authors: Vec<Author>,
    pub abstract_text: String,
    pub url: Option<String>,
    pub pdf_url: Option<String>,
    pub video_url: Option<String>,
}

impl ItemMetadata {
    /// Author names as displayed in the agenda
    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Extra description for a plenary session, matched by title prefix
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlenaryInfo {
    pub session_prefix: String,
    pub abstract_text: String,
    pub person: String,
    pub person_affiliation: Option<String>,
    pub person_email: Option<String>,
    pub pdf_url: Option<String>,
    pub video_url: Option<String>,
}
