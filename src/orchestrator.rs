// Bulk-action orchestrator: the sequential loops applying one follow or
// unfollow per candidate with a pacing pause between iterations. Owns
// the action log and the stat counters; the UI only reads them.

use crate::api::{Account, ApiError, FollowApi};
use crate::discovery;
use crate::log::{ActionKind, ActionLog, ActionRecord, Outcome, Stats};
use crate::pacing::Pacing;
use chrono::Utc;
use tracing::{debug, info};

/// Totals for one bulk run. `attempted` counts loop iterations; for the
/// unfollow run that includes accounts that turned out to follow back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkSummary {
    pub attempted: usize,
    pub done: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BulkSummary {
    fn new(attempted: usize) -> Self {
        BulkSummary {
            attempted,
            ..Default::default()
        }
    }

    fn count(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Done => self.done += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed => self.failed += 1,
        }
    }
}

/// Drives the bulk operations for one authenticated session. Progress
/// is reported through a caller-supplied sink as (current, total) and
/// reset to (0, 0) on completion. Once a run starts it goes to
/// completion; there is no cancellation.
pub struct Orchestrator<'a, A: FollowApi> {
    api: &'a A,
    viewer: String,
    pacing: Pacing,
    log: ActionLog,
    stats: Stats,
    seq: u64,
}

impl<'a, A: FollowApi> Orchestrator<'a, A> {
    pub fn new(api: &'a A, viewer: impl Into<String>, pacing: Pacing) -> Self {
        Orchestrator {
            api,
            viewer: viewer.into(),
            pacing,
            log: ActionLog::new(),
            stats: Stats::default(),
            seq: 0,
        }
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Discover `count` candidates (optionally pinned to one search
    /// query) and follow each one not already followed.
    pub fn bulk_follow(
        &mut self,
        count: usize,
        filter: Option<&str>,
        progress: &mut dyn FnMut(usize, usize),
    ) -> BulkSummary {
        let candidates = discovery::discover_candidates(self.api, count, filter, &self.pacing);
        self.follow_candidates(&candidates, progress)
    }

    /// Follow each candidate in order. Every candidate yields exactly
    /// one log entry: Done, Skipped (already followed) or Failed.
    pub fn follow_candidates(
        &mut self,
        candidates: &[Account],
        progress: &mut dyn FnMut(usize, usize),
    ) -> BulkSummary {
        let total = candidates.len();
        let mut summary = BulkSummary::new(total);

        for (i, candidate) in candidates.iter().enumerate() {
            progress(i + 1, total);

            let outcome = match self.check_and_follow(&candidate.login) {
                Ok(outcome) => outcome,
                Err(err) => {
                    debug!("follow of {} failed: {}", candidate.login, err);
                    Outcome::Failed
                }
            };
            summary.count(outcome);
            self.record(&candidate.login, ActionKind::Follow, outcome);

            // no pause after the last item
            if i + 1 < total {
                self.pacing.pause(self.pacing.follow_interval);
            }
        }

        progress(0, 0);
        info!(
            "bulk follow finished: {} followed, {} already followed, {} failed",
            summary.done, summary.skipped, summary.failed
        );
        summary
    }

    /// Walk the viewer's full following list and unfollow everyone who
    /// does not follow back. Accounts that do follow back get no
    /// mutating call and no log entry. The initial pagination failing
    /// aborts the whole run.
    pub fn unfollow_non_followers(
        &mut self,
        progress: &mut dyn FnMut(usize, usize),
    ) -> Result<BulkSummary, ApiError> {
        let following = self.collect_following()?;
        let total = following.len();
        let mut summary = BulkSummary::new(total);

        for (i, account) in following.iter().enumerate() {
            progress(i + 1, total);

            match self.check_and_unfollow(&account.login) {
                Ok(Some(outcome)) => {
                    summary.count(outcome);
                    self.record(&account.login, ActionKind::Unfollow, outcome);
                }
                Ok(None) => {} // follows back
                Err(err) => {
                    debug!("unfollow of {} failed: {}", account.login, err);
                    summary.count(Outcome::Failed);
                    self.record(&account.login, ActionKind::Unfollow, Outcome::Failed);
                }
            }

            if i + 1 < total {
                self.pacing.pause(self.pacing.unfollow_interval);
            }
        }

        progress(0, 0);
        info!(
            "unfollowed {} of {} checked accounts ({} failed)",
            summary.done, summary.attempted, summary.failed
        );
        Ok(summary)
    }

    fn check_and_follow(&self, login: &str) -> Result<Outcome, ApiError> {
        if self.api.is_following(login)? {
            return Ok(Outcome::Skipped);
        }
        self.api.follow(login)?;
        Ok(Outcome::Done)
    }

    /// `None` means the account follows back and nothing was done.
    fn check_and_unfollow(&self, login: &str) -> Result<Option<Outcome>, ApiError> {
        if self.api.is_user_following(login, &self.viewer)? {
            return Ok(None);
        }
        self.api.unfollow(login)?;
        Ok(Some(Outcome::Done))
    }

    /// Fetch following-list pages until an empty page comes back.
    fn collect_following(&self) -> Result<Vec<Account>, ApiError> {
        let mut all: Vec<Account> = Vec::new();
        let mut page = 1;
        loop {
            let batch = self.api.following(&self.viewer, page)?;
            if batch.is_empty() {
                break;
            }
            all.extend(batch);
            page += 1;
            self.pacing.pause(self.pacing.page_interval);
        }
        Ok(all)
    }

    fn record(&mut self, login: &str, kind: ActionKind, outcome: Outcome) {
        let timestamp = Utc::now();
        self.seq += 1;
        let record = ActionRecord {
            id: format!("{}-{}", timestamp.timestamp_millis(), self.seq),
            login: login.to_string(),
            kind,
            timestamp,
            outcome,
        };
        self.stats.record(&record);
        self.log.push(record);
    }
}
