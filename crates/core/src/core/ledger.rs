//! Progression policy: a level counter or a best (lowest) move count.
//!
//! The ledger owns no I/O beyond the explicit [`ProgressionLedger::load`] and
//! [`ProgressionLedger::persist`] calls against a [`KeyValueStore`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store::{KeyValueStore, StoreError};

pub const DEFAULT_LEVEL_KEY: &str = "labyrinth.level";
pub const DEFAULT_BEST_MOVES_KEY: &str = "labyrinth.best_moves";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LedgerPolicy {
    /// Starts at 1, +1 per completed maze.
    #[default]
    Level,
    /// Lowest move count seen; ties keep the existing record.
    BestMoves,
}

impl LedgerPolicy {
    pub fn default_key(self) -> &'static str {
        match self {
            LedgerPolicy::Level => DEFAULT_LEVEL_KEY,
            LedgerPolicy::BestMoves => DEFAULT_BEST_MOVES_KEY,
        }
    }

    fn initial(self) -> Option<u32> {
        match self {
            LedgerPolicy::Level => Some(1),
            LedgerPolicy::BestMoves => None,
        }
    }
}

/// Outcome of [`ProgressionLedger::record_success`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Ledger value after the update.
    pub value: u32,
    /// The stored value changed (always true for levels).
    pub improved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionLedger {
    policy: LedgerPolicy,
    key: String,
    value: Option<u32>,
}

impl ProgressionLedger {
    pub fn new(policy: LedgerPolicy, key: impl Into<String>) -> Self {
        Self {
            policy,
            key: key.into(),
            value: policy.initial(),
        }
    }

    pub fn with_default_key(policy: LedgerPolicy) -> Self {
        Self::new(policy, policy.default_key())
    }

    /// Seed from the store. A missing or unparsable entry keeps the policy
    /// default; only a failing backend is reported as an error.
    pub fn load<S: KeyValueStore + ?Sized>(&mut self, store: &S) -> Result<(), StoreError> {
        let Some(raw) = store.get(&self.key)? else {
            return Ok(());
        };
        match raw.trim().parse::<u32>() {
            Ok(v) if self.policy == LedgerPolicy::Level && v == 0 => {
                warn!("Ignoring level 0 stored under {:?}", self.key);
            }
            Ok(v) => self.value = Some(v),
            Err(_) => warn!("Ignoring unparsable ledger value {:?} under {:?}", raw, self.key),
        }
        Ok(())
    }

    pub fn persist<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        match self.value {
            Some(v) => store.set(&self.key, &v.to_string()),
            None => Ok(()),
        }
    }

    pub fn record_success(&mut self, moves: u32) -> Progress {
        match self.policy {
            LedgerPolicy::Level => {
                let next = self.value.unwrap_or(1).saturating_add(1);
                self.value = Some(next);
                Progress {
                    value: next,
                    improved: true,
                }
            }
            LedgerPolicy::BestMoves => match self.value {
                Some(best) if moves >= best => Progress {
                    value: best,
                    improved: false,
                },
                _ => {
                    self.value = Some(moves);
                    Progress {
                        value: moves,
                        improved: true,
                    }
                }
            },
        }
    }

    pub fn policy(&self) -> LedgerPolicy {
        self.policy
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current value; `None` only for a best-moves ledger with no record yet.
    pub fn value(&self) -> Option<u32> {
        self.value
    }

    /// Current level, or `None` under the best-moves policy.
    pub fn level(&self) -> Option<u32> {
        match self.policy {
            LedgerPolicy::Level => self.value,
            LedgerPolicy::BestMoves => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn level_starts_at_one_and_counts_up() {
        let mut l = ProgressionLedger::with_default_key(LedgerPolicy::Level);
        assert_eq!(l.level(), Some(1));
        assert_eq!(
            l.record_success(40),
            Progress {
                value: 2,
                improved: true
            }
        );
        assert_eq!(l.record_success(3).value, 3);
        assert_eq!(l.key(), DEFAULT_LEVEL_KEY);
    }

    #[test]
    fn best_moves_keeps_ties_and_worse() {
        let mut l = ProgressionLedger::with_default_key(LedgerPolicy::BestMoves);
        assert_eq!(l.value(), None);
        assert_eq!(l.level(), None);

        assert_eq!(
            l.record_success(20),
            Progress {
                value: 20,
                improved: true
            }
        );
        assert_eq!(
            l.record_success(20),
            Progress {
                value: 20,
                improved: false
            }
        );
        assert!(!l.record_success(25).improved);
        assert_eq!(l.record_success(14).value, 14);
        assert_eq!(l.value(), Some(14));
    }

    #[test]
    fn load_and_persist_through_store() {
        let mut store = MemoryStore::new();
        let mut l = ProgressionLedger::new(LedgerPolicy::Level, "lvl");
        l.record_success(1);
        l.record_success(1);
        l.persist(&mut store).unwrap();
        assert_eq!(store.get("lvl").unwrap().as_deref(), Some("3"));

        let mut fresh = ProgressionLedger::new(LedgerPolicy::Level, "lvl");
        fresh.load(&store).unwrap();
        assert_eq!(fresh.level(), Some(3));
    }

    #[test]
    fn load_ignores_garbage() {
        let mut store = MemoryStore::new();
        store.set("lvl", "not a number").unwrap();
        let mut l = ProgressionLedger::new(LedgerPolicy::Level, "lvl");
        l.load(&store).unwrap();
        assert_eq!(l.level(), Some(1));

        store.set("lvl", "0").unwrap();
        l.load(&store).unwrap();
        assert_eq!(l.level(), Some(1));
    }

    #[test]
    fn empty_best_moves_writes_nothing() {
        let mut store = MemoryStore::new();
        let l = ProgressionLedger::with_default_key(LedgerPolicy::BestMoves);
        l.persist(&mut store).unwrap();
        assert!(store.is_empty());
    }
}
