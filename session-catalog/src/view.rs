use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{Catalog, OverlapIndex, Session};

/// How many overlapping sessions are listed before summarising the rest.
pub const OVERLAP_DETAIL_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateGroup<'a> {
    pub date: NaiveDate,
    pub sessions: Vec<&'a Session>,
}

/// Groups sessions by date, ascending, each group ordered by start time.
/// Sessions starting together keep their input order.
#[must_use]
pub fn build_view<'a>(sessions: &[&'a Session]) -> Vec<DateGroup<'a>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&'a Session>> = BTreeMap::new();
    for &session in sessions {
        by_date.entry(session.date).or_default().push(session);
    }

    by_date
        .into_iter()
        .map(|(date, mut sessions)| {
            sessions.sort_by_key(|session| session.start_unix);
            DateGroup { date, sessions }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub shown: usize,
    pub total: usize,
    pub interested: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Showing {} of {} sessions | {} marked as interested",
            self.shown, self.total, self.interested
        )
    }
}

/// The grouped result of one filtering pass, plus counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View<'a> {
    pub groups: Vec<DateGroup<'a>>,
    pub stats: Stats,
}

impl<'a> View<'a> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Headers only help when there is more than one day to tell apart.
    #[must_use]
    pub fn show_date_headers(&self) -> bool {
        self.groups.len() > 1
    }

    pub fn sessions(&self) -> impl Iterator<Item = &'a Session> + '_ {
        self.groups.iter().flat_map(|group| group.sessions.iter().copied())
    }
}

/// The first few sessions overlapping one session, and how many were left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapDetails<'a> {
    pub listed: Vec<&'a Session>,
    pub remaining: usize,
}

#[must_use]
pub fn overlap_details<'a>(
    catalog: &'a Catalog,
    overlaps: &OverlapIndex,
    id: &str,
) -> OverlapDetails<'a> {
    let ids = overlaps.get(id);
    let listed = ids
        .iter()
        .take(OVERLAP_DETAIL_LIMIT)
        .filter_map(|other| catalog.get(other))
        .collect();

    OverlapDetails {
        listed,
        remaining: ids.len().saturating_sub(OVERLAP_DETAIL_LIMIT),
    }
}
