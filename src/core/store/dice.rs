//! Dice-roll history store.
//!
//! Roll records are client-only: the service computes the per-die
//! results and total, the store assigns a monotonic id and keeps the
//! most recent twenty rolls, newest first.

use chrono::{DateTime, Utc};

use crate::core::api::dice::{Die, RollOutcome};
use crate::core::api::ApiError;

use super::RequestStatus;

/// Maximum number of history entries to keep.
pub const MAX_ROLL_HISTORY: usize = 20;

/// One completed roll in the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollRecord {
    /// Client-assigned identifier (monotonic millisecond timestamp).
    pub id: i64,
    pub die: Die,
    pub num: u32,
    pub results: Vec<i64>,
    pub total: i64,
    pub timestamp: DateTime<Utc>,
}

/// Ephemeral roll history plus request status.
#[derive(Debug, Default)]
pub struct DiceStore {
    rolls: Vec<RollRecord>,
    status: RequestStatus,
    error: Option<String>,
    /// Highest id handed out so far; ids stay monotonic even when two
    /// rolls land within the same millisecond.
    last_id: i64,
}

/// Completion events for roll requests.
#[derive(Debug)]
pub enum DiceEvent {
    RollStarted,
    RollFinished {
        die: Die,
        num: u32,
        outcome: Result<RollOutcome, ApiError>,
    },
}

impl DiceStore {
    pub fn apply(&mut self, event: DiceEvent) {
        match event {
            DiceEvent::RollStarted => {
                self.status = RequestStatus::Loading;
                self.error = None;
            }
            DiceEvent::RollFinished {
                die,
                num,
                outcome: Ok(outcome),
            } => {
                self.status = RequestStatus::Succeeded;
                self.error = None;
                let record = RollRecord {
                    id: self.next_id(),
                    die,
                    num,
                    results: outcome.rolls,
                    total: outcome.total,
                    timestamp: Utc::now(),
                };
                self.rolls.insert(0, record);
                self.rolls.truncate(MAX_ROLL_HISTORY);
            }
            DiceEvent::RollFinished {
                outcome: Err(e), ..
            } => {
                self.status = RequestStatus::Failed;
                self.error = Some(e.to_string());
            }
        }
    }

    /// Empty the history and reset to `Idle` unconditionally.
    pub fn clear(&mut self) {
        self.rolls.clear();
        self.status = RequestStatus::Idle;
        self.error = None;
    }

    /// History, newest first.
    pub fn rolls(&self) -> &[RollRecord] {
        &self.rolls
    }

    /// Most recent roll, if any.
    pub fn last_roll(&self) -> Option<&RollRecord> {
        self.rolls.first()
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn next_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_id = now.max(self.last_id + 1);
        self.last_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::common::fixtures;

    fn finished(die: Die, num: u32, rolls: Vec<i64>) -> DiceEvent {
        let total = rolls.iter().sum();
        DiceEvent::RollFinished {
            die,
            num,
            outcome: Ok(RollOutcome { rolls, total }),
        }
    }

    #[test]
    fn test_roll_prepends_record() {
        let mut store = DiceStore::default();
        store.apply(DiceEvent::RollStarted);
        store.apply(finished(Die::D20, 2, vec![14, 7]));

        let newest = store.last_roll().unwrap();
        assert_eq!(newest.die, Die::D20);
        assert_eq!(newest.num, 2);
        assert_eq!(newest.results, vec![14, 7]);
        assert_eq!(newest.total, 21);
        assert_eq!(newest.results.len(), newest.num as usize);
        assert_eq!(store.status(), RequestStatus::Succeeded);
    }

    #[test]
    fn test_history_capped_at_twenty_newest_first() {
        let mut store = DiceStore::default();
        for i in 1..=21 {
            store.apply(finished(Die::D6, 1, vec![i % 6 + 1]));
        }

        assert_eq!(store.rolls().len(), MAX_ROLL_HISTORY);
        // 21st roll is at index 0; the very first roll has been evicted.
        assert_eq!(store.rolls()[0].results, vec![21 % 6 + 1]);
        assert_eq!(store.rolls().last().unwrap().results, vec![2 % 6 + 1]);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut store = DiceStore::default();
        for _ in 0..5 {
            store.apply(finished(Die::D4, 1, vec![3]));
        }
        // Newest first, so ids must strictly decrease down the list.
        let ids: Vec<_> = store.rolls().iter().map(|r| r.id).collect();
        assert!(ids.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_failure_retained_until_next_roll() {
        let mut store = DiceStore::default();
        store.apply(DiceEvent::RollFinished {
            die: Die::D20,
            num: 1,
            outcome: Err(fixtures::server_error("Invalid dice notation")),
        });
        assert_eq!(store.status(), RequestStatus::Failed);
        assert!(store.error().unwrap().contains("Invalid dice notation"));

        // Next attempt clears the retained error.
        store.apply(DiceEvent::RollStarted);
        assert_eq!(store.error(), None);

        store.apply(finished(Die::D20, 1, vec![11]));
        assert_eq!(store.status(), RequestStatus::Succeeded);
        assert_eq!(store.rolls().len(), 1);
    }

    #[test]
    fn test_clear_resets_unconditionally() {
        let mut store = DiceStore::default();
        store.apply(finished(Die::D8, 1, vec![5]));
        store.apply(DiceEvent::RollFinished {
            die: Die::D8,
            num: 1,
            outcome: Err(fixtures::server_error("boom")),
        });

        store.clear();

        assert!(store.rolls().is_empty());
        assert_eq!(store.status(), RequestStatus::Idle);
        assert_eq!(store.error(), None);
    }
}
