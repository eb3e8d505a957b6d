//! Temporal Classifier & Formatter.
//!
//! Given the date/time strings extracted by the scanner and an explicit
//! reference instant, produces the temporal bucket and the human label
//! shown inside a pill. Classification is a pure function of its
//! arguments; the caller reads the clock, once per render pass.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Format of the date portion of a token.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Format of the optional time portion of a token.
pub const TIME_FORMAT: &str = "%H:%M";

/// Temporal bucket of a date relative to the reference instant.
///
/// The five buckets are a total, mutually exclusive partition of all
/// valid dates. Comparison happens at day granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Overdue,
    Today,
    Tomorrow,
    ThisWeek,
    Future,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Bucket::Overdue,
        Bucket::Today,
        Bucket::Tomorrow,
        Bucket::ThisWeek,
        Bucket::Future,
    ];

    /// Kebab-case name, used in CSS classes and style property names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Overdue => "overdue",
            Bucket::Today => "today",
            Bucket::Tomorrow => "tomorrow",
            Bucket::ThisWeek => "this-week",
            Bucket::Future => "future",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified, renderable date token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Relative display string, e.g. "Today 2:30 PM" or "3 Mar".
    pub label: String,
    pub bucket: Bucket,
    /// The parsed moment (midnight when the token carried no time).
    pub moment: NaiveDateTime,
}

/// Classify extracted date/time strings against `now`.
///
/// Returns `None` when the strings do not name a real calendar date or
/// time of day; the caller leaves the original text untouched. There
/// is no other failure mode.
#[must_use]
pub fn classify(date: &str, time: Option<&str>, now: NaiveDateTime) -> Option<Classification> {
    let day = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;
    let time_of_day = match time {
        Some(raw) => NaiveTime::parse_from_str(raw, TIME_FORMAT).ok()?,
        None => NaiveTime::MIN,
    };
    let moment = day.and_time(time_of_day);
    let bucket = bucket_for(day, now);
    let label = label_for(moment, bucket, now);
    Some(Classification {
        label,
        bucket,
        moment,
    })
}

fn bucket_for(day: NaiveDate, now: NaiveDateTime) -> Bucket {
    let today = now.date();
    let tomorrow = today + Duration::days(1);
    // End of the day seven days out; the boundary day itself is still
    // part of the week window.
    let window_end = today + Duration::days(7);

    if day < today {
        Bucket::Overdue
    } else if day == today {
        Bucket::Today
    } else if day == tomorrow {
        Bucket::Tomorrow
    } else if day <= window_end {
        Bucket::ThisWeek
    } else {
        Bucket::Future
    }
}

fn label_for(moment: NaiveDateTime, bucket: Bucket, now: NaiveDateTime) -> String {
    let suffix = time_suffix(moment.time());
    let day = moment.date();
    match bucket {
        Bucket::Today => format!("Today{suffix}"),
        Bucket::Tomorrow => format!("Tomorrow{suffix}"),
        Bucket::ThisWeek => format!("{}{suffix}", day.format("%A")),
        Bucket::Overdue | Bucket::Future => {
            if day.year() == now.date().year() {
                format!("{}{suffix}", day.format("%-d %b"))
            } else {
                format!("{}{suffix}", day.format("%-d %b %Y"))
            }
        }
    }
}

/// 12-hour time suffix, empty for midnight. Minutes are dropped when
/// zero ("3 PM" rather than "3:00 PM").
fn time_suffix(time: NaiveTime) -> String {
    if time.hour() == 0 && time.minute() == 0 {
        return String::new();
    }
    if time.minute() == 0 {
        format!(" {}", time.format("%-I %p"))
    } else {
        format!(" {}", time.format("%-I:%M %p"))
    }
}
