//! Routing Index Service
//!
//! Owns a node's hop index behind a reader/writer lock. Lookups share the
//! read lock; every mutation holds the write lock for its whole duration,
//! so readers never observe a half-applied shift or merge. A round is
//! committed only once its advertisement has been published.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::{AttenuatedBloomFilter, AttenuatedConfig, BloomFilter};
use crate::error::{FilterError, RoutingError};
use crate::ports::{AdvertisementPublisher, RoutingIndexApi};

struct RoutingState {
    /// Items held by this node
    local: BloomFilter,
    /// Neighbor advertisements merged since the last round
    inbound: AttenuatedBloomFilter,
    /// Index built by the last round, plus local items added since
    index: AttenuatedBloomFilter,
    rounds: u64,
}

/// Routing Index Service implementation
///
/// Implements the `RoutingIndexApi` port using an injected publisher.
pub struct RoutingIndexService<P: AdvertisementPublisher> {
    state: RwLock<RoutingState>,
    publisher: Arc<P>,
}

impl<P: AdvertisementPublisher> RoutingIndexService<P> {
    /// Create a service with empty index and no local items
    pub fn new(config: &AttenuatedConfig, publisher: Arc<P>) -> Result<Self, FilterError> {
        let index = AttenuatedBloomFilter::from_config(config)?;
        let local = index.layers()[0].clone();
        Ok(Self {
            state: RwLock::new(RoutingState {
                local,
                inbound: index.clone(),
                index,
                rounds: 0,
            }),
            publisher,
        })
    }

    /// Number of completed propagation rounds
    pub fn rounds(&self) -> u64 {
        self.state.read().rounds
    }
}

impl<P: AdvertisementPublisher> RoutingIndexApi for RoutingIndexService<P> {
    fn advertise_local(&self, key: &[u8]) -> Result<(), FilterError> {
        let mut state = self.state.write();
        state.index.insert_at(0, key)?;
        state.local.insert(key);
        Ok(())
    }

    fn receive(&self, advertisement: &AttenuatedBloomFilter) -> Result<(), FilterError> {
        self.state.write().inbound.merge(advertisement)
    }

    fn propagate(&self) -> Result<(), RoutingError> {
        // Publish under the write lock: a failed publish leaves the round
        // open, and concurrent rounds reach the publisher in index order.
        let mut state = self.state.write();

        let mut next = state.inbound.clone();
        next.shift();
        next.merge_layer(0, &state.local)?;

        self.publisher.publish(&next)?;

        state.index = next;
        state.inbound.clear();
        state.rounds += 1;

        debug!(round = state.rounds, layers = ?state.index.layer_info(), "Rebuilt routing index");
        info!(depth = state.index.depth(), round = state.rounds, "Published routing advertisement");
        Ok(())
    }

    fn lookup(&self, key: &[u8]) -> Option<usize> {
        self.state.read().index.contains(key)
    }

    fn snapshot(&self) -> AttenuatedBloomFilter {
        self.state.read().index.clone()
    }
}
