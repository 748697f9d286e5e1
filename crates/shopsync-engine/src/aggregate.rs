//! Per-run accumulation of counters, outcome log and discards.
//!
//! Owned by the single consumer of the reconciliation stream, so no locking.

use chrono::{DateTime, Utc};
use shopsync_core::{
    Action, ActionCounts, CanonicalProduct, DiscardedProduct, OutcomeEntry, RunResult,
};

/// Result of reconciling one product.
#[derive(Debug)]
pub(crate) struct ProductOutcome<'a> {
    pub product: &'a CanonicalProduct,
    pub action: Action,
    pub id: Option<i64>,
    /// Set exactly when `action` is [`Action::Discard`].
    pub discard_reason: Option<String>,
}

impl<'a> ProductOutcome<'a> {
    pub fn applied(product: &'a CanonicalProduct, action: Action, id: Option<i64>) -> Self {
        Self {
            product,
            action,
            id,
            discard_reason: None,
        }
    }

    pub fn discarded(product: &'a CanonicalProduct, reason: String) -> Self {
        Self {
            product,
            action: Action::Discard,
            id: None,
            discard_reason: Some(reason),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Aggregator {
    counts: ActionCounts,
    outcomes: Vec<OutcomeEntry>,
    discards: Vec<DiscardedProduct>,
}

impl Aggregator {
    pub fn record(&mut self, outcome: ProductOutcome<'_>) {
        self.counts.record(outcome.action);
        self.outcomes.push(OutcomeEntry {
            sku: outcome.product.sku.clone(),
            action: outcome.action,
            id: outcome.id,
            error: outcome.discard_reason.clone(),
        });
        if let Some(reason) = outcome.discard_reason {
            self.discards.push(DiscardedProduct {
                sku: outcome.product.sku.clone(),
                reason,
                product: outcome.product.clone(),
            });
        }
    }

    pub fn record_deletion(&mut self, sku: &str, id: i64) {
        self.outcomes.push(OutcomeEntry {
            sku: sku.to_owned(),
            action: Action::Delete,
            id: Some(id),
            error: None,
        });
    }

    pub fn counts(&self) -> ActionCounts {
        self.counts
    }

    pub fn finish(self, started_at: DateTime<Utc>, deleted: usize) -> RunResult {
        RunResult {
            started_at,
            finished_at: Utc::now(),
            counts: self.counts,
            deleted,
            outcomes: self.outcomes,
            discards: self.discards,
        }
    }
}
