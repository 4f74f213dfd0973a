use chrono::{NaiveDate, NaiveTime};

/// Session type as declared with `%type` in an order file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionType {
    Paper,
    BestPaper,
    Poster,
    Tutorial,
    Plenary,
    Break,
    Other(String),
}

impl SessionType {
    pub fn from_attr(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "paper" => SessionType::Paper,
            "best_paper" => SessionType::BestPaper,
            "poster" => SessionType::Poster,
            "tutorial" => SessionType::Tutorial,
            "plenary" => SessionType::Plenary,
            "break" => SessionType::Break,
            other => SessionType::Other(other.to_string()),
        }
    }

    /// Sessions whose tracks are computed from their item IDs
    pub fn is_research(&self) -> bool {
        matches!(
            self,
            SessionType::Paper | SessionType::BestPaper | SessionType::Poster
        )
    }
}

/// What an order-file line describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    SessionHeader,
    Talk,
    Break,
    Plenary,
}

/// One scheduled line of an order file
#[derive(Debug, Clone, PartialEq)]
pub struct OrderEntry {
    pub kind: EntryKind,
    pub session_type: SessionType,
    /// Item ID for talks; `None` for headers
    pub local_id: Option<String>,
    pub date: NaiveDate,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub room: Option<String>,
    /// Session title for headers, breaks and plenaries
    pub title: Option<String>,
    pub chair: Option<String>,
    /// Session ID from `%id`, shown as a title prefix in the main event
    pub session_id: Option<String>,
    /// 1-based line in the order file
    pub line: usize,
}

/// A session header and its items, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledSession {
    pub header: OrderEntry,
    pub items: Vec<OrderEntry>,
}

impl ScheduledSession {
    pub fn title(&self) -> &str {
        self.header.title.as_deref().unwrap_or("")
    }
}

/// Parsed order file for one event
#[derive(Debug, Clone, PartialEq)]
pub struct EventSchedule {
    pub event: String,
    pub sessions: Vec<ScheduledSession>,
}

impl EventSchedule {
    /// Number of items carrying a local ID
    pub fn item_count(&self) -> usize {
        self.sessions
            .iter()
            .flat_map(|s| s.items.iter())
            .filter(|e| e.local_id.is_some())
            .count()
    }
}
