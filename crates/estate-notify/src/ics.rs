use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::event_window;

const MAX_LINE_OCTETS: usize = 75;
const STAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Single-event iCalendar invite (RFC 5545), published rather than requested
#[derive(Debug, Clone)]
pub struct IcsEvent<'a> {
    pub uid: String,
    pub now: DateTime<Utc>,
    pub summary: &'a str,
    pub description: &'a str,
    pub location: &'a str,
}

impl<'a> IcsEvent<'a> {
    pub fn new(summary: &'a str, description: &'a str, location: &'a str) -> Self {
        Self {
            uid: Uuid::new_v4().to_string(),
            now: Utc::now(),
            summary,
            description,
            location,
        }
    }

    pub fn render(&self) -> String {
        let (start, end) = event_window(self.now);

        let lines = [
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            "PRODID:-//Estate Sales Notifier//EN".to_string(),
            "METHOD:PUBLISH".to_string(),
            "BEGIN:VEVENT".to_string(),
            format!("UID:{}", self.uid),
            format!("DTSTAMP:{}", self.now.format(STAMP_FORMAT)),
            format!("DTSTART:{}", start.format(STAMP_FORMAT)),
            format!("DTEND:{}", end.format(STAMP_FORMAT)),
            format!("SUMMARY:{}", escape_text(self.summary)),
            format!("DESCRIPTION:{}", escape_text(self.description)),
            format!("LOCATION:{}", escape_text(self.location)),
            "STATUS:CONFIRMED".to_string(),
            "END:VEVENT".to_string(),
            "END:VCALENDAR".to_string(),
        ];

        let mut out = String::new();
        for line in &lines {
            out.push_str(&fold(line));
            out.push_str("\r\n");
        }
        out
    }
}

/// TEXT value escaping: backslash, semicolon, comma, newline
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(ch),
        }
    }
    out
}

/// Break content lines longer than 75 octets; continuation lines start with a space
fn fold(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut width = 0;

    for ch in line.chars() {
        let len = ch.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(ch);
        width += len;
    }
    out
}
