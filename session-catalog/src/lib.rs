//! Filtering and schedule-conflict engine for a conference session catalog.
//!
//! A [`Catalog`] is parsed once from the conference export, an
//! [`OverlapIndex`] is derived from it, and every change to a [`FilterState`]
//! produces a fresh, date-grouped [`View`]. [`Browser`] ties these together
//! with the persisted [`InterestSet`].

mod browser;
mod filter;
mod interest;
mod overlap;
mod parser;
mod structs;
mod view;

#[cfg(feature = "ics")]
mod ics;

pub use browser::Browser;
pub use filter::{filter_sessions, DateFilter, FilterState};
pub use interest::{FileStore, InterestSet, KeyValueStore, MemoryStore, INTEREST_KEY};
pub use overlap::{compute_overlaps, OverlapIndex};
pub use parser::{parse_catalog, parse_catalog_value, LoadReport, Shape};
pub use structs::{Catalog, Session, Speaker};
pub use view::{
    build_view, overlap_details, DateGroup, OverlapDetails, Stats, View, OVERLAP_DETAIL_LIMIT,
};

#[cfg(feature = "ics")]
pub use crate::ics::export_ics;
