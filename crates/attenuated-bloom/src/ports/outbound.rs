//! Outbound Ports (Driven Ports)
//!
//! The transport that moves advertisements between nodes lives outside this
//! crate. It is expected to ship each layer's `words()` together with its
//! bit and hash counts, and rebuild them with `BloomFilter::from_raw_parts`
//! and `AttenuatedBloomFilter::from_layers` on the receiving side.

use crate::domain::AttenuatedBloomFilter;
use crate::error::PublishError;

/// Advertisement transport (Driven Port)
pub trait AdvertisementPublisher: Send + Sync {
    /// Broadcast this node's index to its neighbors
    ///
    /// Called with the service's write lock held; must not call back into
    /// the service.
    fn publish(&self, advertisement: &AttenuatedBloomFilter) -> Result<(), PublishError>;
}
