//! Cleanup of the date/time text scraped from sale cards.
//!
//! The listing page glues status words, distances and numbers into one
//! string ("Sat, Nov 8Nearby9am to 1pm", "Nov 119am to 1pm"). [`normalize`]
//! reduces that to `Mon D[-D], Ham-Hpm`, or to an empty string when nothing
//! usable is left. Every step is a plain function so each degradation path
//! can be exercised on its own.

use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Status and distance words that trail the useful part of the text
static NOISE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)going|starts|started|ongoing|ended|nearby|miles|away").unwrap()
});

static GLUED_HOUR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)([0-9]{2,})(am|pm)").unwrap());

static TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(1[0-2]|[1-9])\s*(am|pm)\s*to\s*(1[0-2]|[1-9])\s*(am|pm)").unwrap()
});

static MONTH: Lazy<Regex> = Lazy::new(|| Regex::new(&MONTHS.join("|")).unwrap());

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

const ZERO_WIDTH: [char; 2] = ['\u{200c}', '\u{200b}'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("am") {
            Some(Meridiem::Am)
        } else if s.eq_ignore_ascii_case("pm") {
            Some(Meridiem::Pm)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "am",
            Meridiem::Pm => "pm",
        }
    }
}

/// Whole hour on a 12-hour clock, hour in 1..=12
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockHour {
    pub hour: u8,
    pub meridiem: Meridiem,
}

impl fmt::Display for ClockHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.hour, self.meridiem.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: ClockHour,
    pub end: ClockHour,
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Month plus the day numbers found after it, in page order. `days` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSpan {
    pub month: &'static str,
    pub days: Vec<u32>,
}

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.days.as_slice() {
            [] => f.write_str(self.month),
            [day] => write!(f, "{} {}", self.month, day),
            [first, .., last] => write!(f, "{} {}-{}", self.month, first, last),
        }
    }
}

/// Cut everything from the first status/distance word on, then drop zero-width joiners.
pub fn truncate_noise(raw: &str) -> String {
    let kept = match NOISE.find(raw) {
        Some(m) => &raw[..m.start()],
        None => raw,
    };

    kept.chars().filter(|c| !ZERO_WIDTH.contains(c)).collect()
}

/// Separate a leading number glued onto an hour: "119am" -> "11 9am", "1110am" -> "11 10am".
///
/// 10, 11 and 12 are the only two-digit hours, so a run ending in one of them
/// keeps two digits as the hour; any other run keeps only its last digit.
/// Runs that still don't form a valid hour ("130am" -> "13 0am") are left for
/// the time-range pattern to reject.
pub fn split_glued_hours(text: &str) -> String {
    GLUED_HOUR
        .replace_all(text, |caps: &Captures| {
            let digits = &caps[1];
            let meridiem = &caps[2];

            let two_digit_hour = ["10", "11", "12"].iter().any(|h| digits.ends_with(h));
            let split = if two_digit_hour {
                digits.len() - 2
            } else {
                digits.len() - 1
            };

            let (leading, hour) = digits.split_at(split);
            if leading.is_empty() {
                format!("{hour}{meridiem}")
            } else {
                format!("{leading} {hour}{meridiem}")
            }
        })
        .into_owned()
}

/// Leftmost "H am/pm to H am/pm", with the byte offset where the match starts.
pub fn extract_time_range(text: &str) -> Option<(TimeRange, usize)> {
    let caps = TIME_RANGE.captures(text)?;
    let offset = caps.get(0)?.start();

    let endpoint = |hour: usize, meridiem: usize| -> Option<ClockHour> {
        Some(ClockHour {
            hour: caps[hour].parse().ok()?,
            meridiem: Meridiem::parse(&caps[meridiem])?,
        })
    };

    let range = TimeRange {
        start: endpoint(1, 2)?,
        end: endpoint(3, 4)?,
    };

    Some((range, offset))
}

/// First month abbreviation in `window` and the 1..=31 digit runs after it.
///
/// Whole digit runs are tested, never split, so a year or a zip fragment is
/// simply skipped. Returns `None` when no month is present or no day survives.
pub fn extract_date_span(window: &str) -> Option<DateSpan> {
    let found = MONTH.find(window)?;
    let month = MONTHS.iter().copied().find(|m| *m == found.as_str())?;

    let days: Vec<u32> = DIGIT_RUN
        .find_iter(&window[found.end()..])
        .filter_map(|run| run.as_str().parse().ok())
        .filter(|day| (1..=31).contains(day))
        .collect();

    if days.is_empty() {
        return None;
    }

    Some(DateSpan { month, days })
}

/// Reduce scraped date text to `"<date>, <time>"`, `"<date>"`, `"<time>"` or `""`.
pub fn normalize(raw: &str) -> String {
    let cleaned = split_glued_hours(&truncate_noise(raw));

    // Only text before the time range can hold the date
    let (time, window) = match extract_time_range(&cleaned) {
        Some((range, offset)) => (Some(range), &cleaned[..offset]),
        None => (None, cleaned.as_str()),
    };

    match (extract_date_span(window), time) {
        (Some(date), Some(time)) => format!("{date}, {time}"),
        (Some(date), None) => date.to_string(),
        (None, Some(time)) => time.to_string(),
        (None, None) => String::new(),
    }
}
