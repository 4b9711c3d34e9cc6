mod common;

use common::{account, FakeApi};
use gitflock_cli::discovery::{discover_candidates, QUERY_FRAGMENTS};
use gitflock_cli::pacing::Pacing;
use std::collections::HashSet;

#[test]
fn respects_requested_count_and_dedupes() {
    let mut api = FakeApi::default();
    api.search_results = (1..=50).map(|n| account(n, &format!("user{}", n))).collect();

    let found = discover_candidates(&api, 10, None, &Pacing::zero());

    assert_eq!(found.len(), 10);
    let ids: HashSet<u64> = found.iter().map(|a| a.id).collect();
    assert_eq!(ids.len(), 10);
}

#[test]
fn short_backend_yields_short_list_without_error() {
    let mut api = FakeApi::default();
    // the backend only ever returns the same 5 accounts
    api.search_results = (1..=5).map(|n| account(n, &format!("user{}", n))).collect();

    let found = discover_candidates(&api, 100, None, &Pacing::zero());

    assert_eq!(found.len(), 5);
    let ids: HashSet<u64> = found.iter().map(|a| a.id).collect();
    assert_eq!(ids.len(), 5);
    // full ceiling spent: 8 initial attempts plus 20 extra
    assert_eq!(api.search_calls.borrow().len(), 28);
}

#[test]
fn zero_count_returns_empty_without_calls() {
    let api = FakeApi::default();

    let found = discover_candidates(&api, 0, None, &Pacing::zero());

    assert!(found.is_empty());
    assert!(api.search_calls.borrow().is_empty());
}

#[test]
fn persistent_failures_short_circuit() {
    let mut api = FakeApi::default();
    api.fail_search = true;

    let found = discover_candidates(&api, 100, None, &Pacing::zero());

    assert!(found.is_empty());
    // 8 initial attempts, then the overflow pass gives up after 10
    // consecutive failures
    assert_eq!(api.search_calls.borrow().len(), 18);
}

#[test]
fn filter_pins_every_query() {
    let mut api = FakeApi::default();
    api.search_results = (1..=50).map(|n| account(n, &format!("user{}", n))).collect();

    discover_candidates(&api, 10, Some("language:rust"), &Pacing::zero());

    assert!(!api.search_calls.borrow().is_empty());
    assert!(api
        .search_calls
        .borrow()
        .iter()
        .all(|(query, _)| query == "language:rust"));
}

#[test]
fn random_sampling_stays_within_the_canned_fragments() {
    let api = FakeApi::default(); // searches succeed but yield nothing

    let found = discover_candidates(&api, 10, None, &Pacing::zero());

    assert!(found.is_empty());
    assert_eq!(api.search_calls.borrow().len(), 28);
    for (query, page) in api.search_calls.borrow().iter() {
        assert!(QUERY_FRAGMENTS.contains(&query.as_str()));
        assert!((1..=30).contains(page));
    }
}
