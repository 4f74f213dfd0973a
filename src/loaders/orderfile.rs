//! Order file parsing.
//!
//! An order file lists an event's agenda chronologically, one construct per
//! line:
//!
//! ```text
//! * Monday, June 3, 2019
//! + 08:00--09:00 Breakfast # %room Exhibit Hall
//! + 09:00--10:00 Keynote 1: Language and Society # %type plenary %room Ballroom
//! = 10:30--12:10 Oral Sessions
//! ! Session 1A: Cognitive # %room Nicollet A %chair Jane Doe %type paper %id 1A
//! 104 10:30--10:48
//! 12-srw 10:48--11:06
//! ! Posters 1 # %type poster %id 1P
//! 230
//! ```
//!
//! Item lines start with a local ID: letters, digits and `-_./`, with at
//! least one digit (`104`, `12-srw`, `T1-tutorial`). Every line must match
//! one of these shapes; anything else is a hard error because a skipped line
//! would silently drop an agenda entry.

use std::collections::HashMap;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::diagnostics::{Diagnostics, WarningKind};
use crate::error::{read_input, AgendaError, Result};
use crate::models::{EntryKind, EventSchedule, OrderEntry, ScheduledSession, SessionType};
use crate::utils::normalize_whitespace;

const DAY_FORMATS: &[&str] = &["%A, %B %d, %Y", "%B %d, %Y", "%Y-%m-%d"];

type TimeRange = (Option<NaiveTime>, Option<NaiveTime>);

/// Header line (`=`, `!`, `+`) after the marker
struct Header {
    times: TimeRange,
    title: String,
    attrs: HashMap<String, String>,
}

struct Parser<'a> {
    event: &'a str,
    path: &'a Path,
    date: Option<NaiveDate>,
    group_times: Option<TimeRange>,
    open: Option<ScheduledSession>,
    sessions: Vec<ScheduledSession>,
}

pub fn load_file(event: &str, path: &Path, diag: &mut Diagnostics) -> Result<EventSchedule> {
    let text = read_input(path)?;
    let schedule = parse(event, &text, path, diag)?;
    debug!(
        "Parsed {} sessions and {} items for {} from {}",
        schedule.sessions.len(),
        schedule.item_count(),
        event,
        path.display()
    );
    Ok(schedule)
}

pub fn parse(event: &str, text: &str, path: &Path, diag: &mut Diagnostics) -> Result<EventSchedule> {
    let mut parser = Parser {
        event,
        path,
        date: None,
        group_times: None,
        open: None,
        sessions: Vec::new(),
    };

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        parser.line(line, idx + 1, diag)?;
    }
    parser.close(diag);

    Ok(EventSchedule {
        event: event.to_string(),
        sessions: parser.sessions,
    })
}

impl<'a> Parser<'a> {
    fn error(&self, line: usize, message: impl Into<String>) -> AgendaError {
        AgendaError::parse(self.path, line, message)
    }

    fn line(&mut self, text: &str, line: usize, diag: &mut Diagnostics) -> Result<()> {
        let (marker, rest) = text.split_at(text.chars().next().map_or(0, char::len_utf8));

        if marker == "*" {
            let date = parse_day(rest.trim()).ok_or_else(|| {
                self.error(line, format!("unrecognized day '{}'", rest.trim()))
            })?;
            self.close(diag);
            self.group_times = None;
            self.date = Some(date);
            return Ok(());
        }

        let Some(date) = self.date else {
            return Err(self.error(line, "entry before the first day marker"));
        };

        match marker {
            "=" => {
                let header = self.header(rest, line)?;
                self.close(diag);
                self.group_times = Some(header.times);
            }
            "!" => {
                let header = self.header(rest, line)?;
                self.close(diag);
                let mut entry = self.header_entry(header, date, line, SessionType::Paper);
                if entry.start.is_none() && entry.end.is_none() {
                    if let Some((start, end)) = self.group_times {
                        entry.start = start;
                        entry.end = end;
                    }
                }
                self.open = Some(ScheduledSession {
                    header: entry,
                    items: Vec::new(),
                });
            }
            "+" => {
                let header = self.header(rest, line)?;
                self.close(diag);
                self.group_times = None;
                let entry = self.header_entry(header, date, line, SessionType::Break);
                self.sessions.push(ScheduledSession {
                    header: entry,
                    items: Vec::new(),
                });
            }
            _ => self.item(text, date, line)?,
        }
        Ok(())
    }

    fn header(&self, rest: &str, line: usize) -> Result<Header> {
        let (main, attrs) = match rest.split_once('#') {
            Some((main, attrs)) => (main, parse_attrs(attrs)),
            None => (rest, HashMap::new()),
        };
        let main = main.trim();

        let (times, title) = match main.split_once(char::is_whitespace) {
            Some((first, remainder)) if first.contains("--") => (
                parse_time_range(first)
                    .ok_or_else(|| self.error(line, format!("invalid time range '{}'", first)))?,
                remainder,
            ),
            _ if main.contains("--") && !main.contains(' ') => {
                return Err(self.error(line, "session without a title"));
            }
            _ => ((None, None), main),
        };

        let title = normalize_whitespace(title);
        if title.is_empty() {
            return Err(self.error(line, "session without a title"));
        }

        Ok(Header {
            times,
            title,
            attrs,
        })
    }

    fn header_entry(
        &self,
        header: Header,
        date: NaiveDate,
        line: usize,
        default_type: SessionType,
    ) -> OrderEntry {
        let session_type = header
            .attrs
            .get("type")
            .map(|t| SessionType::from_attr(t))
            .unwrap_or(default_type);
        let kind = match session_type {
            SessionType::Plenary => EntryKind::Plenary,
            SessionType::Break => EntryKind::Break,
            _ => EntryKind::SessionHeader,
        };

        OrderEntry {
            kind,
            session_type,
            local_id: None,
            date,
            start: header.times.0,
            end: header.times.1,
            room: header.attrs.get("room").cloned(),
            title: Some(header.title),
            chair: header
                .attrs
                .get("chair")
                .or_else(|| header.attrs.get("chair1"))
                .cloned(),
            session_id: header.attrs.get("id").cloned(),
            line,
        }
    }

    fn item(&mut self, text: &str, date: NaiveDate, line: usize) -> Result<()> {
        let (main, attrs) = match text.split_once('#') {
            Some((main, attrs)) => (main, parse_attrs(attrs)),
            None => (text, HashMap::new()),
        };

        let mut tokens = main.split_whitespace();
        let id = tokens.next().unwrap_or("");
        if !is_local_id(id) {
            return Err(self.error(line, format!("unrecognized line '{}'", text)));
        }

        let times = match tokens.next() {
            Some(range) => parse_time_range(range)
                .ok_or_else(|| self.error(line, format!("unrecognized line '{}'", text)))?,
            None => (None, None),
        };
        if tokens.next().is_some() {
            return Err(self.error(line, format!("unrecognized line '{}'", text)));
        }

        let (event, path) = (self.event, self.path);
        let Some(session) = self.open.as_mut() else {
            return Err(AgendaError::parse(
                path,
                line,
                format!("item '{}' of event '{}' is not inside a session", id, event),
            ));
        };

        session.items.push(OrderEntry {
            kind: EntryKind::Talk,
            session_type: session.header.session_type.clone(),
            local_id: Some(id.to_string()),
            date,
            start: times.0,
            end: times.1,
            room: attrs
                .get("room")
                .cloned()
                .or_else(|| session.header.room.clone()),
            title: None,
            chair: None,
            session_id: None,
            line,
        });
        Ok(())
    }

    /// Finish the open session: fill in times the app needs and check order.
    fn close(&mut self, diag: &mut Diagnostics) {
        let Some(mut session) = self.open.take() else {
            return;
        };

        let header = &mut session.header;
        if header.start.is_none() && header.end.is_none() {
            match header.session_type {
                SessionType::Tutorial => {
                    if let Some(first) = session.items.first() {
                        header.start = first.start;
                        header.end = first.end;
                    }
                }
                SessionType::Paper | SessionType::BestPaper => {
                    if let (Some(first), Some(last)) = (session.items.first(), session.items.last())
                    {
                        header.start = first.start;
                        header.end = last.end;
                    }
                }
                _ => {}
            }
        }

        if matches!(
            header.session_type,
            SessionType::Poster | SessionType::Tutorial
        ) {
            for item in &mut session.items {
                item.start = header.start;
                item.end = header.end;
            }
        }

        let mut previous: Option<(NaiveTime, usize)> = None;
        for item in &session.items {
            let Some(start) = item.start else { continue };
            if let Some((prev_start, prev_line)) = previous {
                if start < prev_start {
                    diag.warn(
                        WarningKind::OutOfOrderTime,
                        format!(
                            "{}:{}: item starts at {} but the item on line {} starts at {} (session '{}')",
                            self.path.display(),
                            item.line,
                            start.format("%H:%M"),
                            prev_line,
                            prev_start.format("%H:%M"),
                            session.title()
                        ),
                    );
                }
            }
            previous = Some((start, item.line));
        }

        self.sessions.push(session);
    }
}

fn parse_day(text: &str) -> Option<NaiveDate> {
    DAY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// `HH:MM--HH:MM`
fn parse_time_range(text: &str) -> Option<TimeRange> {
    let (start, end) = text.split_once("--")?;
    let start = NaiveTime::parse_from_str(start.trim(), "%H:%M").ok()?;
    let end = NaiveTime::parse_from_str(end.trim(), "%H:%M").ok()?;
    Some((Some(start), Some(end)))
}

/// `%room Nicollet A %chair Jane Doe` → {room: "Nicollet A", chair: "Jane Doe"}
fn parse_attrs(text: &str) -> HashMap<String, String> {
    text.split('%')
        .skip(1)
        .filter_map(|segment| {
            let segment = segment.trim();
            let (key, value) = segment
                .split_once(char::is_whitespace)
                .unwrap_or((segment, ""));
            let key = key.to_lowercase();
            (!key.is_empty()).then(|| (key, normalize_whitespace(value)))
        })
        .collect()
}

fn is_local_id(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'))
}
