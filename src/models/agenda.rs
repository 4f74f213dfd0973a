/// Whether a row is a top-level session or an item within one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowKind {
    #[default]
    Session,
    Sub,
}

impl RowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowKind::Session => "Session",
            RowKind::Sub => "Sub",
        }
    }
}

/// One row of the Agenda sheet
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgendaRow {
    /// `MM/DD/YYYY`
    pub date: String,
    /// `HH:MM`
    pub start: String,
    pub end: String,
    pub tracks: String,
    pub session_title: String,
    pub item_title: String,
    pub description: String,
    pub speakers: String,
    pub location: String,
    pub pdf_url: String,
    pub video_url: String,
    pub kind: RowKind,
}

impl AgendaRow {
    /// Cells in sheet column order
    pub fn cells(&self) -> [&str; 12] {
        [
            &self.date,
            &self.start,
            &self.end,
            &self.tracks,
            &self.session_title,
            &self.item_title,
            &self.description,
            &self.speakers,
            &self.location,
            &self.pdf_url,
            &self.video_url,
            self.kind.as_str(),
        ]
    }

    /// Date, start, end and session title must all be present for import
    pub fn has_required_fields(&self) -> bool {
        !self.date.is_empty()
            && !self.start.is_empty()
            && !self.end.is_empty()
            && !self.session_title.is_empty()
    }
}
