use chrono::NaiveDate;
use session_catalog::{parse_catalog, Browser, DateFilter, FilterState, MemoryStore, Shape};

const FIXTURE: &str = include_str!("fixtures/sessions.json");

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn browser() -> Browser<MemoryStore> {
    let report = parse_catalog(FIXTURE);
    assert_eq!(report.shape, Shape::Wrapped);
    assert_eq!(report.skipped, 1);
    Browser::new(report.catalog, MemoryStore::default())
}

fn shown(browser: &Browser<MemoryStore>, state: &FilterState, today: &str) -> Vec<String> {
    browser
        .view(state, date(today))
        .sessions()
        .map(|session| session.id.clone())
        .collect()
}

#[test]
fn overlap_index_from_export() {
    let browser = browser();
    let overlaps = browser.overlaps();

    assert_eq!(overlaps.get("bh-101"), ["bh-102"]);
    assert_eq!(overlaps.get("bh-102"), ["bh-101"]);
    // The keynote ends exactly when bh-101 starts.
    assert!(!overlaps.contains("bh-103"));
    assert!(!overlaps.contains("bh-201"));
    assert_eq!(overlaps.len(), 2);
}

#[test]
fn full_week_view_is_grouped_and_ordered() {
    let browser = browser();
    let view = browser.view(&FilterState::default(), date("2025-08-06"));

    let dates = view
        .groups
        .iter()
        .map(|group| group.date.to_string())
        .collect::<Vec<_>>();
    assert_eq!(dates, ["2025-08-06", "2025-08-07"]);
    assert_eq!(
        view.sessions().map(|s| s.id.as_str()).collect::<Vec<_>>(),
        ["bh-103", "bh-101", "bh-102", "bh-202", "bh-201"]
    );
    assert_eq!(
        view.stats.to_string(),
        "Showing 5 of 5 sessions | 0 marked as interested"
    );
}

#[test]
fn microsoft_security_sessions() {
    let browser = browser();
    let state = FilterState {
        microsoft_only: true,
        search_term: "security".to_string(),
        ..FilterState::default()
    };
    assert_eq!(shown(&browser, &state, "2025-08-06"), ["bh-101"]);

    let state = FilterState {
        search_term: "Security".to_string(),
        ..FilterState::default()
    };
    assert_eq!(
        shown(&browser, &state, "2025-08-06"),
        ["bh-103", "bh-101"]
    );
}

#[test]
fn past_days_hidden_unless_selected() {
    let browser = browser();
    assert_eq!(
        shown(&browser, &FilterState::default(), "2025-08-07"),
        ["bh-202", "bh-201"]
    );

    let state = FilterState {
        date_filter: DateFilter::On(date("2025-08-06")),
        overlaps_only: true,
        ..FilterState::default()
    };
    assert_eq!(shown(&browser, &state, "2025-08-07"), ["bh-101", "bh-102"]);
}

#[test]
fn interests_survive_a_reload() {
    let mut browser = browser();
    browser.toggle_interest("bh-201").unwrap();
    browser.toggle_interest("bh-102").unwrap();
    browser.toggle_interest("bh-102").unwrap();

    let store = browser.into_store();
    let reloaded = Browser::new(parse_catalog(FIXTURE).catalog, store);

    assert!(reloaded.is_interested("bh-201"));
    assert!(!reloaded.is_interested("bh-102"));

    let state = FilterState {
        interested_only: true,
        ..FilterState::default()
    };
    assert_eq!(shown(&reloaded, &state, "2025-08-01"), ["bh-201"]);
}

#[test]
fn available_dates() {
    let browser = browser();
    assert_eq!(
        browser.catalog().dates(),
        [date("2025-08-06"), date("2025-08-07")]
    );
}
