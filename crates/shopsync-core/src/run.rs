//! Per-run bookkeeping: actions, counters, outcome log and final results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::products::CanonicalProduct;

/// What a run did (or decided) for one SKU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Update,
    NoChange,
    Discard,
    Delete,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Create => write!(f, "create"),
            Action::Update => write!(f, "update"),
            Action::NoChange => write!(f, "no_change"),
            Action::Discard => write!(f, "discard"),
            Action::Delete => write!(f, "delete"),
        }
    }
}

/// Per-action counters for reconciled products. Deletions are tracked
/// separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCounts {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub discarded: usize,
}

impl ActionCounts {
    /// Bumps the counter for `action`. `Delete` has no counter here.
    pub fn record(&mut self, action: Action) {
        match action {
            Action::Create => self.created += 1,
            Action::Update => self.updated += 1,
            Action::NoChange => self.unchanged += 1,
            Action::Discard => self.discarded += 1,
            Action::Delete => {}
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.created + self.updated + self.unchanged + self.discarded
    }
}

/// One line of the run's outcome log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeEntry {
    pub sku: String,
    pub action: Action,
    /// Destination id, set for updates and deletions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A product the run refused to push, kept for the discard audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardedProduct {
    pub sku: String,
    pub reason: String,
    pub product: CanonicalProduct,
}

/// Complete result of a successful run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub counts: ActionCounts,
    pub deleted: usize,
    /// Reconciliation outcomes in completion order, followed by deletions.
    pub outcomes: Vec<OutcomeEntry>,
    pub discards: Vec<DiscardedProduct>,
}

impl RunResult {
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            counts: self.counts,
            deleted: self.deleted,
        }
    }
}

/// What entry points report back to their callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub counts: ActionCounts,
    pub deleted: usize,
}

/// Dry-run output: what a run would do, without touching the destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPlan {
    pub counts: ActionCounts,
    /// SKUs that would be created.
    pub to_create: Vec<String>,
    /// SKUs that would be updated.
    pub to_update: Vec<String>,
    /// SKUs that would be discarded, with the reason.
    pub to_discard: Vec<(String, String)>,
    /// Destination SKUs that would be deleted.
    pub to_delete: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_record_each_action() {
        let mut counts = ActionCounts::default();
        for action in [
            Action::Create,
            Action::Create,
            Action::Update,
            Action::NoChange,
            Action::Discard,
        ] {
            counts.record(action);
        }
        assert_eq!(counts.created, 2);
        assert_eq!(counts.updated, 1);
        assert_eq!(counts.unchanged, 1);
        assert_eq!(counts.discarded, 1);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn delete_does_not_count_towards_total() {
        let mut counts = ActionCounts::default();
        counts.record(Action::Delete);
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn outcome_entry_omits_empty_optionals() {
        let entry = OutcomeEntry {
            sku: "A-1".to_string(),
            action: Action::NoChange,
            id: None,
            error: None,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"sku":"A-1","action":"no_change"}"#);
    }

    #[test]
    fn summary_serializes_counts_and_deleted() {
        let summary = RunSummary {
            counts: ActionCounts {
                created: 1,
                updated: 2,
                unchanged: 3,
                discarded: 4,
            },
            deleted: 5,
        };
        let value = serde_json::to_value(summary).unwrap();
        assert_eq!(value["counts"]["unchanged"], 3);
        assert_eq!(value["deleted"], 5);
    }
}
