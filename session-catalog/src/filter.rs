use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{InterestSet, OverlapIndex, Session};

/// Serialized as `"all"` or `"YYYY-MM-DD"`, the same text `FromStr` accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFilter {
    /// Every date from the reference date onwards.
    #[default]
    All,
    /// Exactly this date, past or not.
    On(NaiveDate),
}

impl FromStr for DateFilter {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(DateFilter::All);
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(DateFilter::On)
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateFilter::All => f.write_str("all"),
            DateFilter::On(date) => write!(f, "{date}"),
        }
    }
}

impl Serialize for DateFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub microsoft_only: bool,
    pub overlaps_only: bool,
    pub interested_only: bool,
    pub search_term: String,
    pub date_filter: DateFilter,
}

/// Applies `state` to `sessions`, keeping survivors in their original order.
///
/// `today` is the reference date in the conference's local calendar. With
/// [`DateFilter::All`] anything dated before it is hidden; an explicitly
/// selected date is always shown in full.
#[must_use]
pub fn filter_sessions<'a>(
    sessions: &'a [Session],
    state: &FilterState,
    overlaps: &OverlapIndex,
    interests: &InterestSet,
    today: NaiveDate,
) -> Vec<&'a Session> {
    let needle = state.search_term.trim().to_lowercase();

    sessions
        .iter()
        .filter(|session| {
            (!state.microsoft_only || session.has_microsoft_speaker())
                && (!state.overlaps_only || overlaps.contains(&session.id))
                && (!state.interested_only || interests.is_interested(&session.id))
                && matches_date(session, state.date_filter, today)
                && matches_search(session, &needle)
        })
        .collect()
}

fn matches_date(session: &Session, filter: DateFilter, today: NaiveDate) -> bool {
    match filter {
        DateFilter::All => session.date >= today,
        DateFilter::On(date) => session.date == date,
    }
}

/// `needle` is already trimmed and lower-cased. Empty matches everything.
fn matches_search(session: &Session, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    contains(&session.title)
        || session.description.as_deref().is_some_and(contains)
        || session.speakers().any(|speaker| contains(&speaker.name))
}
