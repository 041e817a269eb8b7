use std::sync::{Arc, RwLock};

use crate::models::MarketSnapshot;
use crate::services::loader::RecordSets;

/// Holds the live snapshot of both registries
///
/// Readers clone the `Arc` and keep using it for the whole query, so a
/// concurrent reload never exposes a partially replaced registry.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Arc<MarketSnapshot>>,
}

impl SnapshotStore {
    pub fn new(records: RecordSets) -> Self {
        Self {
            current: RwLock::new(Arc::new(MarketSnapshot::new(
                1,
                records.buyers,
                records.producers,
            ))),
        }
    }

    /// The snapshot queries should run against right now
    pub fn current(&self) -> Arc<MarketSnapshot> {
        let guard = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Publish new record sets as the next generation
    pub fn replace(&self, records: RecordSets) -> Arc<MarketSnapshot> {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let next = Arc::new(MarketSnapshot::new(
            guard.generation + 1,
            records.buyers,
            records.producers,
        ));
        *guard = Arc::clone(&next);

        tracing::info!(
            "Published snapshot generation {} ({} buyers, {} producers)",
            next.generation,
            next.buyers.len(),
            next.producers.len()
        );

        next
    }
}
