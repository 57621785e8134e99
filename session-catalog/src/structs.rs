use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

const MICROSOFT: &str = "microsoft";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Speaker {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl Speaker {
    /// Case-insensitive substring match of the affiliation on "microsoft",
    /// so "Microsoft Research" and "ex-microsoft" both count.
    #[must_use]
    pub fn is_microsoft(&self) -> bool {
        self.affiliation
            .as_deref()
            .is_some_and(|affiliation| affiliation.to_lowercase().contains(MICROSOFT))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: NaiveDate,
    /// Display-only, never parsed.
    pub start: String,
    /// Display-only, never parsed.
    pub end: String,
    pub start_unix: i64,
    pub end_unix: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub speaker_groups: Vec<Vec<Speaker>>,
}

impl Session {
    /// All speakers across all groups, in group order.
    pub fn speakers(&self) -> impl Iterator<Item = &Speaker> {
        self.speaker_groups.iter().flatten()
    }

    #[must_use]
    pub fn has_microsoft_speaker(&self) -> bool {
        self.speakers().any(Speaker::is_microsoft)
    }

    /// Zero-length or inverted intervals. These never overlap anything.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.start_unix >= self.end_unix
    }

    /// Half-open interval intersection on `[start_unix, end_unix)`.
    #[must_use]
    pub fn overlaps(&self, other: &Session) -> bool {
        !self.is_degenerate()
            && !other.is_degenerate()
            && self.start_unix < other.end_unix
            && self.end_unix > other.start_unix
    }
}

/// The session catalog for one run. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    sessions: Vec<Session>,
    positions: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, keeping the first session for any repeated id.
    /// Returns the catalog and the number of dropped duplicates.
    pub(crate) fn from_sessions(sessions: Vec<Session>) -> (Self, usize) {
        let mut catalog = Catalog::default();
        let mut duplicates = 0;

        for session in sessions {
            if catalog.positions.contains_key(&session.id) {
                log::debug!("Skipping duplicate session id `{}`", session.id);
                duplicates += 1;
                continue;
            }

            catalog
                .positions
                .insert(session.id.clone(), catalog.sessions.len());
            catalog.sessions.push(session);
        }

        (catalog, duplicates)
    }

    #[must_use]
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Session> {
        self.position(id).map(|idx| &self.sessions[idx])
    }

    /// Position of a session in catalog order.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Distinct session dates, ascending.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.sessions
            .iter()
            .map(|session| session.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn microsoft_affiliation_is_case_insensitive_substring() {
        assert!(speaker("a", Some("Microsoft")).is_microsoft());
        assert!(speaker("a", Some("MICROSOFT Research")).is_microsoft());
        assert!(speaker("a", Some("ex-microsoft")).is_microsoft());
        assert!(!speaker("a", Some("Micro Soft")).is_microsoft());
        assert!(!speaker("a", None).is_microsoft());
    }

    #[test]
    fn microsoft_session_scans_every_group() {
        let mut s = session("1", "2025-08-07", 0, 10);
        s.speaker_groups = vec![
            vec![speaker("a", Some("Acme"))],
            vec![speaker("b", None), speaker("c", Some("Microsoft Corp"))],
        ];
        assert!(s.has_microsoft_speaker());
        assert_eq!(s.speakers().count(), 3);
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let a = session("a", "2025-08-07", 900, 1000);
        let b = session("b", "2025-08-07", 930, 1030);
        let c = session("c", "2025-08-07", 1000, 1100);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn degenerate_sessions_never_overlap() {
        let point = session("p", "2025-08-07", 950, 950);
        let inverted = session("i", "2025-08-07", 990, 910);
        let wide = session("w", "2025-08-07", 0, 2000);
        assert!(!point.overlaps(&wide));
        assert!(!wide.overlaps(&point));
        assert!(!inverted.overlaps(&wide));
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let mut second = session("a", "2025-08-08", 0, 1);
        second.title = "Second".to_string();
        let (catalog, duplicates) = Catalog::from_sessions(vec![
            session("a", "2025-08-07", 0, 1),
            second,
            session("b", "2025-08-07", 0, 1),
        ]);
        assert_eq!(duplicates, 1);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("a").unwrap().title, "Session a");
        assert_eq!(catalog.position("b"), Some(1));
    }

    #[test]
    fn dates_are_distinct_and_sorted() {
        let catalog = catalog(vec![
            session("a", "2025-08-08", 0, 1),
            session("b", "2025-08-07", 0, 1),
            session("c", "2025-08-08", 0, 1),
        ]);
        let dates = catalog
            .dates()
            .into_iter()
            .map(|date| date.to_string())
            .collect::<Vec<_>>();
        assert_eq!(dates, ["2025-08-07", "2025-08-08"]);
    }
}
