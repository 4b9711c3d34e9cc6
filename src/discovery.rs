// Candidate sourcing: best-effort random sampling of the user search
// endpoint. Picks a random canned query fragment and a random page per
// attempt, deduplicates by account id, and gives up after a hard cap of
// attempts. Exhaustion is not an error; the caller just gets a short
// list.

use crate::api::{Account, FollowApi};
use crate::pacing::Pacing;
use rand::Rng;
use std::collections::HashSet;
use tracing::warn;

/// Canned search-query fragments sampled during discovery.
pub const QUERY_FRAGMENTS: [&str; 31] = [
    "followers:>100",
    "followers:>500",
    "followers:>1000",
    "repos:>5",
    "repos:>10",
    "repos:>20",
    "location:usa",
    "location:canada",
    "location:uk",
    "location:germany",
    "location:france",
    "location:japan",
    "location:korea",
    "location:india",
    "language:javascript",
    "language:python",
    "language:java",
    "language:typescript",
    "language:go",
    "language:rust",
    "language:php",
    "language:ruby",
    "created:>2020",
    "created:>2019",
    "created:>2018",
    "type:user followers:>50",
    "type:user followers:>200",
    "type:user repos:>10",
    "type:user repos:>25",
    "type:user created:>2019",
    "type:user created:>2017",
];

const INITIAL_ATTEMPTS: usize = 8;
const INITIAL_PAGE_SPAN: u32 = 15;
const EXTRA_ATTEMPTS: usize = 20;
const EXTRA_PAGE_SPAN: u32 = 30;
const FAILURE_CUTOFF: usize = 10;

/// Gather up to `count` distinct candidate accounts. With a `filter`
/// every attempt searches that query; otherwise each attempt samples a
/// random fragment. Failed attempts are logged and skipped.
pub fn discover_candidates<A: FollowApi>(
    api: &A,
    count: usize,
    filter: Option<&str>,
    pacing: &Pacing,
) -> Vec<Account> {
    let mut found: Vec<Account> = Vec::new();
    if count == 0 {
        return found;
    }

    let mut rng = rand::thread_rng();
    let mut seen: HashSet<u64> = HashSet::new();

    for _ in 0..INITIAL_ATTEMPTS {
        let query = pick_query(filter, &mut rng);
        let page = rng.gen_range(1..=INITIAL_PAGE_SPAN);
        match api.search_users(query, page) {
            Ok(results) => collect(&mut found, &mut seen, results.items, count),
            Err(err) => warn!("search for '{}' (page {}) failed: {}", query, page, err),
        }
        if found.len() >= count {
            break;
        }
        pacing.pause(pacing.search_interval);
    }

    // Overflow pass with a wider page span. Gives up after the attempt
    // ceiling or a run of consecutive failures.
    let mut attempts = 0;
    let mut failures = 0;
    while found.len() < count && attempts < EXTRA_ATTEMPTS {
        let query = pick_query(filter, &mut rng);
        let page = rng.gen_range(1..=EXTRA_PAGE_SPAN);
        match api.search_users(query, page) {
            Ok(results) => {
                failures = 0;
                collect(&mut found, &mut seen, results.items, count);
            }
            Err(err) => {
                failures += 1;
                warn!("search for '{}' (page {}) failed: {}", query, page, err);
                if failures >= FAILURE_CUTOFF {
                    break;
                }
            }
        }
        attempts += 1;
        pacing.pause(pacing.search_retry_interval);
    }

    found.truncate(count);
    found
}

fn pick_query<'a>(filter: Option<&'a str>, rng: &mut impl Rng) -> &'a str {
    filter.unwrap_or_else(|| QUERY_FRAGMENTS[rng.gen_range(0..QUERY_FRAGMENTS.len())])
}

fn collect(found: &mut Vec<Account>, seen: &mut HashSet<u64>, items: Vec<Account>, count: usize) {
    for account in items {
        if found.len() >= count {
            break;
        }
        if seen.insert(account.id) {
            found.push(account);
        }
    }
}
