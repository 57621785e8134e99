use std::collections::HashMap;

use serde::Serialize;

use crate::Session;

/// Session id to the ids of every other session whose time interval
/// intersects it, in catalog order. Sessions without overlaps have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OverlapIndex {
    overlaps: HashMap<String, Vec<String>>,
}

impl OverlapIndex {
    /// Overlapping ids for `id`, empty if it overlaps nothing or is unknown.
    #[must_use]
    pub fn get(&self, id: &str) -> &[String] {
        self.overlaps.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.overlaps.contains_key(id)
    }

    /// Number of sessions with at least one overlap.
    #[must_use]
    pub fn len(&self) -> usize {
        self.overlaps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overlaps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.overlaps
            .iter()
            .map(|(id, overlapping)| (id.as_str(), overlapping.as_slice()))
    }
}

/// Computes the overlap index with a sweep over sessions ordered by start.
///
/// Sessions are visited by ascending start; the active set holds every
/// earlier-starting session that has not yet ended, all of which overlap the
/// current one. Each per-session list is then put back into slice order, so
/// the result equals the plain pairwise definition
/// (`start1 < end2 && end1 > start2`, `i != j`) for any input order. Worst
/// case is still quadratic when everything overlaps, since the output is.
///
/// Ids are expected to be unique within `sessions`.
#[must_use]
pub fn compute_overlaps(sessions: &[Session]) -> OverlapIndex {
    let mut order = (0..sessions.len())
        .filter(|&idx| !sessions[idx].is_degenerate())
        .collect::<Vec<_>>();
    order.sort_by_key(|&idx| (sessions[idx].start_unix, idx));

    let mut found = vec![Vec::new(); sessions.len()];
    let mut active: Vec<usize> = Vec::new();

    for idx in order {
        let start = sessions[idx].start_unix;
        active.retain(|&other| sessions[other].end_unix > start);

        for &other in &active {
            found[idx].push(other);
            found[other].push(idx);
        }

        active.push(idx);
    }

    let overlaps = found
        .into_iter()
        .enumerate()
        .filter(|(_, overlapping)| !overlapping.is_empty())
        .map(|(idx, mut overlapping)| {
            overlapping.sort_unstable();
            let ids = overlapping
                .into_iter()
                .map(|other| sessions[other].id.clone())
                .collect();
            (sessions[idx].id.clone(), ids)
        })
        .collect();

    OverlapIndex { overlaps }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::fixtures::session;

    fn pairwise(sessions: &[Session]) -> OverlapIndex {
        let mut overlaps = HashMap::new();
        for (i, a) in sessions.iter().enumerate() {
            let overlapping = sessions
                .iter()
                .enumerate()
                .filter(|&(j, b)| i != j && a.overlaps(b))
                .map(|(_, b)| b.id.clone())
                .collect::<Vec<_>>();
            if !overlapping.is_empty() {
                overlaps.insert(a.id.clone(), overlapping);
            }
        }
        OverlapIndex { overlaps }
    }

    /// Deterministic pseudo-random catalog with lots of collisions.
    fn scattered(count: usize) -> Vec<Session> {
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move |bound: u64| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (state >> 33) % bound
        };

        (0..count)
            .map(|n| {
                let start = next(500) as i64 * 60;
                let length = next(5) as i64 * 30 * 60;
                session(&format!("s{n}"), "2025-08-07", start, start + length)
            })
            .collect()
    }

    #[test]
    fn half_open_boundaries() {
        let sessions = vec![
            session("a", "2025-08-07", 9 * 3600, 10 * 3600),
            session("b", "2025-08-07", 9 * 3600 + 1800, 10 * 3600 + 1800),
            session("c", "2025-08-07", 10 * 3600, 11 * 3600),
        ];
        let index = compute_overlaps(&sessions);

        assert_eq!(index.get("a"), ["b"]);
        assert_eq!(index.get("b"), ["a", "c"]);
        assert_eq!(index.get("c"), ["b"]);
    }

    #[test]
    fn only_overlapping_sessions_have_entries() {
        let sessions = vec![
            session("a", "2025-08-07", 0, 10),
            session("b", "2025-08-07", 5, 15),
            session("lonely", "2025-08-07", 100, 200),
            session("point", "2025-08-07", 7, 7),
        ];
        let index = compute_overlaps(&sessions);

        assert_eq!(index.len(), 2);
        assert!(!index.contains("lonely"));
        assert!(!index.contains("point"));
        assert!(index.get("lonely").is_empty());
        assert!(index.get("unknown").is_empty());
    }

    #[test]
    fn lists_follow_catalog_order() {
        let sessions = vec![
            session("late", "2025-08-07", 50, 100),
            session("wide", "2025-08-07", 0, 200),
            session("early", "2025-08-07", 10, 60),
        ];
        let index = compute_overlaps(&sessions);

        assert_eq!(index.get("wide"), ["late", "early"]);
        assert_eq!(index.get("late"), ["wide", "early"]);
        assert_eq!(index.get("early"), ["late", "wide"]);
    }

    #[test]
    fn identical_intervals_overlap_each_other() {
        let sessions = vec![
            session("a", "2025-08-07", 0, 10),
            session("b", "2025-08-07", 0, 10),
        ];
        let index = compute_overlaps(&sessions);
        assert_eq!(index.get("a"), ["b"]);
        assert_eq!(index.get("b"), ["a"]);
    }

    #[test]
    fn matches_pairwise_definition() {
        let sessions = scattered(300);
        assert_eq!(compute_overlaps(&sessions), pairwise(&sessions));
    }

    #[test]
    fn symmetric_and_never_self() {
        let sessions = scattered(200);
        let index = compute_overlaps(&sessions);

        for (id, overlapping) in index.iter() {
            for other in overlapping {
                assert_ne!(id, other);
                assert!(index.get(other).iter().any(|back| back == id));
            }
        }
    }

    #[test]
    fn empty_catalog() {
        assert!(compute_overlaps(&[]).is_empty());
    }
}
