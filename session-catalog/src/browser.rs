use std::io;

use chrono::NaiveDate;

use crate::{
    build_view, compute_overlaps, filter_sessions, overlap_details, Catalog, FilterState,
    InterestSet, KeyValueStore, OverlapDetails, OverlapIndex, Session, Stats, View,
};

/// Owns the loaded catalog, its overlap index, and the user's interests.
///
/// The overlap index is computed once here and never invalidated, since the
/// catalog cannot change afterwards. Nothing is recomputed on
/// [`Browser::toggle_interest`]; call [`Browser::view`] again to see the effect.
#[derive(Debug)]
pub struct Browser<S> {
    catalog: Catalog,
    overlaps: OverlapIndex,
    interests: InterestSet,
    store: S,
}

impl<S: KeyValueStore> Browser<S> {
    pub fn new(catalog: Catalog, store: S) -> Self {
        let overlaps = compute_overlaps(catalog.sessions());
        let interests = InterestSet::restore(&store);

        log::info!(
            "Loaded {} sessions, {} with overlaps, {} marked as interested",
            catalog.len(),
            overlaps.len(),
            interests.len()
        );

        Self {
            catalog,
            overlaps,
            interests,
            store,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn overlaps(&self) -> &OverlapIndex {
        &self.overlaps
    }

    #[must_use]
    pub fn interests(&self) -> &InterestSet {
        &self.interests
    }

    #[must_use]
    pub fn is_interested(&self, id: &str) -> bool {
        self.interests.is_interested(id)
    }

    /// Flips interest in `id` and writes the set back to the store.
    /// Returns whether the session is now flagged.
    pub fn toggle_interest(&mut self, id: &str) -> io::Result<bool> {
        if self.catalog.get(id).is_none() {
            log::warn!("Toggling interest in unknown session `{id}`");
        }

        let interested = self.interests.toggle(id);
        self.interests.persist(&mut self.store)?;
        Ok(interested)
    }

    #[must_use]
    pub fn filter(&self, state: &FilterState, today: NaiveDate) -> Vec<&Session> {
        filter_sessions(
            self.catalog.sessions(),
            state,
            &self.overlaps,
            &self.interests,
            today,
        )
    }

    #[must_use]
    pub fn view(&self, state: &FilterState, today: NaiveDate) -> View<'_> {
        let filtered = self.filter(state, today);
        log::debug!("{} of {} sessions pass the filters", filtered.len(), self.catalog.len());

        View {
            stats: Stats {
                shown: filtered.len(),
                total: self.catalog.len(),
                interested: self.interests.len(),
            },
            groups: build_view(&filtered),
        }
    }

    #[must_use]
    pub fn overlaps_of(&self, id: &str) -> &[String] {
        self.overlaps.get(id)
    }

    #[must_use]
    pub fn overlap_details(&self, id: &str) -> OverlapDetails<'_> {
        overlap_details(&self.catalog, &self.overlaps, id)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
