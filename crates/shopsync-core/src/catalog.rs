//! Destination-side view of the catalog, captured once per run.

use std::collections::{BTreeMap, HashSet};

use crate::products::ProductSnapshot;

/// A product as it currently exists in the destination store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationRecord {
    /// Destination product id, the target of update and delete calls.
    pub id: i64,
    pub snapshot: ProductSnapshot,
}

/// Existing destination products keyed by SKU (the first variant's SKU).
///
/// Read-only once built; iteration follows SKU order so sweeps are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationIndex {
    records: BTreeMap<String, DestinationRecord>,
}

impl DestinationIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, replacing any earlier record with the same SKU.
    pub fn insert(&mut self, sku: impl Into<String>, record: DestinationRecord) {
        self.records.insert(sku.into(), record);
    }

    #[must_use]
    pub fn get(&self, sku: &str) -> Option<&DestinationRecord> {
        self.records.get(sku)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DestinationRecord)> {
        self.records.iter().map(|(sku, rec)| (sku.as_str(), rec))
    }

    /// Records whose SKU is not in `source_skus`, in SKU order.
    #[must_use]
    pub fn missing_from(&self, source_skus: &HashSet<&str>) -> Vec<(&str, &DestinationRecord)> {
        self.iter()
            .filter(|(sku, _)| !source_skus.contains(sku))
            .collect()
    }
}

impl FromIterator<(String, DestinationRecord)> for DestinationIndex {
    fn from_iter<I: IntoIterator<Item = (String, DestinationRecord)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (sku, record) in iter {
            index.insert(sku, record);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64) -> DestinationRecord {
        DestinationRecord {
            id,
            snapshot: ProductSnapshot {
                title: String::new(),
                body_html: String::new(),
                vendor: String::new(),
                tags: Vec::new(),
                variants: Vec::new(),
                images: Vec::new(),
                options: Vec::new(),
            },
        }
    }

    #[test]
    fn later_insert_replaces_earlier_record() {
        let index: DestinationIndex = vec![
            ("SKU-1".to_string(), record(1)),
            ("SKU-1".to_string(), record(2)),
        ]
        .into_iter()
        .collect();
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("SKU-1").map(|r| r.id), Some(2));
    }

    #[test]
    fn missing_from_returns_only_absent_skus_in_order() {
        let index: DestinationIndex = vec![
            ("C".to_string(), record(3)),
            ("A".to_string(), record(1)),
            ("B".to_string(), record(2)),
        ]
        .into_iter()
        .collect();
        let source: HashSet<&str> = ["B"].into_iter().collect();
        let missing: Vec<i64> = index.missing_from(&source).iter().map(|(_, r)| r.id).collect();
        assert_eq!(missing, vec![1, 3]);
    }

    #[test]
    fn empty_index_has_nothing_missing() {
        let index = DestinationIndex::new();
        assert!(index.is_empty());
        assert!(index.missing_from(&HashSet::new()).is_empty());
    }
}
