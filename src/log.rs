// Action records, the capped most-recent-first log, and the aggregate
// counters shown on the dashboard.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::fmt;

/// How many entries the action log keeps.
pub const LOG_CAP: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Follow,
    Unfollow,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Follow => write!(f, "follow"),
            ActionKind::Unfollow => write!(f, "unfollow"),
        }
    }
}

/// Result of one attempted action. `Skipped` means the relationship
/// already had the desired state and no mutating call was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Skipped,
    Failed,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Done)
    }
}

/// One entry in the action log. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct ActionRecord {
    pub id: String,
    pub login: String,
    pub kind: ActionKind,
    pub timestamp: DateTime<Utc>,
    pub outcome: Outcome,
}

/// Bounded ordered log, newest entry first. Inserting past the cap
/// drops the oldest entries.
#[derive(Debug)]
pub struct ActionLog {
    entries: VecDeque<ActionRecord>,
    cap: usize,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::with_capacity(LOG_CAP)
    }

    pub fn with_capacity(cap: usize) -> Self {
        ActionLog {
            entries: VecDeque::with_capacity(cap),
            cap,
        }
    }

    pub fn push(&mut self, record: ActionRecord) {
        self.entries.push_front(record);
        self.entries.truncate(self.cap);
    }

    /// Entries newest first.
    pub fn iter(&self) -> impl Iterator<Item = &ActionRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters derived from successful records only.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stats {
    pub followed: u64,
    pub unfollowed: u64,
}

impl Stats {
    pub fn record(&mut self, record: &ActionRecord) {
        if record.outcome.is_success() {
            match record.kind {
                ActionKind::Follow => self.followed += 1,
                ActionKind::Unfollow => self.unfollowed += 1,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: usize, outcome: Outcome) -> ActionRecord {
        ActionRecord {
            id: n.to_string(),
            login: format!("user{}", n),
            kind: ActionKind::Follow,
            timestamp: Utc::now(),
            outcome,
        }
    }

    #[test]
    fn log_is_bounded_and_newest_first() {
        let mut log = ActionLog::with_capacity(3);
        for n in 1..=5 {
            log.push(record(n, Outcome::Done));
        }
        assert_eq!(log.len(), 3);
        let ids: Vec<&str> = log.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["5", "4", "3"]);
    }

    #[test]
    fn stats_count_successes_only() {
        let mut stats = Stats::default();
        stats.record(&record(1, Outcome::Done));
        stats.record(&record(2, Outcome::Skipped));
        stats.record(&record(3, Outcome::Failed));
        assert_eq!(stats.followed, 1);
        assert_eq!(stats.unfollowed, 0);
    }
}
