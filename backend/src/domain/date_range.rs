//! Date filters shared by the listing pages.
//!
//! Listings accept three query parameters: `dates` (`7d` or `today`), `day`
//! and `week` (both `YYYY-MM-DD`). They are checked in that order when
//! choosing the lower bound; `dates` never sets an upper bound. Values that
//! do not look like a calendar day are ignored rather than rejected.

use std::sync::OnceLock;

use chrono::{DateTime, Days, NaiveDate, Utc};
use mockable::Clock;
use regex::Regex;
use serde::Deserialize;

/// `dates` value selecting the last seven days.
pub const LAST_SEVEN_DAYS: &str = "7d";
/// `dates` value selecting today only.
pub const TODAY: &str = "today";

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Raw date filter parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DateQuery {
    pub dates: Option<String>,
    pub day: Option<String>,
    pub week: Option<String>,
}

impl DateQuery {
    /// The parameters that are present, in a stable order, for carrying the
    /// filter over into pagination links.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("dates", self.dates.as_deref()),
            ("day", self.day.as_deref()),
            ("week", self.week.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect()
    }
}

static DAY_RE: OnceLock<Regex> = OnceLock::new();

fn day_regex() -> &'static Regex {
    DAY_RE.get_or_init(|| {
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$")
            .unwrap_or_else(|error| panic!("day regex failed to compile: {error}"))
    })
}

/// Whether `value` has the `YYYY-MM-DD` shape.
///
/// # Examples
/// ```
/// use standup::domain::date_range::is_day;
///
/// assert!(is_day(Some("2024-01-05")));
/// assert!(!is_day(Some("2024-1-5")));
/// assert!(!is_day(None));
/// ```
pub fn is_day(value: Option<&str>) -> bool {
    value.is_some_and(|value| day_regex().is_match(value))
}

/// Parse a `YYYY-MM-DD` value. Strings with the right shape that are not a
/// calendar date (for example `2024-13-40`) yield `None`.
pub fn parse_day(value: Option<&str>) -> Option<NaiveDate> {
    if !is_day(value) {
        return None;
    }
    value.and_then(|value| NaiveDate::parse_from_str(value, DAY_FORMAT).ok())
}

/// Inclusive lower bound selected by the query.
pub fn start_date(query: &DateQuery, today: NaiveDate) -> Option<NaiveDate> {
    match query.dates.as_deref() {
        Some(LAST_SEVEN_DAYS) => return today.checked_sub_days(Days::new(7)),
        Some(TODAY) => return Some(today),
        _ => {}
    }
    parse_day(query.day.as_deref()).or_else(|| parse_day(query.week.as_deref()))
}

/// Inclusive upper bound selected by the query.
pub fn end_date(query: &DateQuery) -> Option<NaiveDate> {
    if let Some(day) = parse_day(query.day.as_deref()) {
        return day.checked_add_days(Days::new(1));
    }
    parse_day(query.week.as_deref()).and_then(|week| week.checked_add_days(Days::new(7)))
}

/// Creation-time bounds applied to a listing. Both ends are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// No bounds at all.
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Resolve the query against the clock's current UTC date.
    pub fn from_query(query: &DateQuery, clock: &dyn Clock) -> Self {
        let today = clock.utc().date_naive();
        Self {
            start: start_date(query, today).map(midnight),
            end: end_date(query).map(midnight),
        }
    }

    /// Whether `created` falls inside the range.
    pub fn contains(&self, created: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| created >= start) && self.end.is_none_or(|end| created <= end)
    }
}

fn midnight(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(chrono::NaiveTime::MIN).and_utc()
}
