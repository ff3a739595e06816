//! Inbound Ports (Driving Ports)
//!
//! The API a routing or discovery node uses to maintain its hop index.

use crate::domain::AttenuatedBloomFilter;
use crate::error::{FilterError, RoutingError};

/// Hop-distance routing index (Driving Port)
///
/// One propagation round is: `advertise_local` for each locally held item,
/// `receive` each neighbor advertisement, then `propagate`.
pub trait RoutingIndexApi: Send + Sync {
    /// Record an item held by this node (distance 0)
    fn advertise_local(&self, key: &[u8]) -> Result<(), FilterError>;

    /// Fold a neighbor's advertisement into the next round
    ///
    /// The advertisement is read as seen from the neighbor, so its layer `i`
    /// becomes distance `i + 1` here once the round is propagated.
    fn receive(&self, advertisement: &AttenuatedBloomFilter) -> Result<(), FilterError>;

    /// Close the round: rebuild the index from local items and received
    /// advertisements, then publish it
    ///
    /// The rebuilt index replaces the current one only if publishing
    /// succeeds. On error the round stays open and a retry sees the same
    /// received advertisements.
    fn propagate(&self) -> Result<(), RoutingError>;

    /// Minimum known hop distance to `key`, if any
    fn lookup(&self, key: &[u8]) -> Option<usize>;

    /// Copy of the current index
    fn snapshot(&self) -> AttenuatedBloomFilter;
}
