//! # Attenuated Bloom
//!
//! Approximate set membership with Bloom filters, plus attenuated Bloom
//! filters that layer membership by hop distance so routing and discovery
//! nodes can advertise "I, or something `d` hops away, has item X" without
//! exchanging item lists.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure, synchronous filter logic
//!   - `BloomFilter`: Sized bit array with SipHash double hashing
//!   - `AttenuatedBloomFilter`: One `BloomFilter` per hop layer
//!   - `AttenuatedConfig` / `AttenuatedConfigBuilder`: Validated sizing
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `RoutingIndexApi`: Driving port (inbound API)
//!   - `AdvertisementPublisher`: Driven port (external transport)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `RoutingIndexService`: Implements `RoutingIndexApi` behind a
//!     reader/writer lock
//!
//! ## Invariants
//!
//! - Filter bit counts are positive multiples of 64 and never change
//! - No false negatives: if inserted, `contains()` returns true until cleared
//! - Every attenuated layer is a fully sized filter of identical dimensions
//!
//! ## Concurrency
//!
//! Domain types are plain values with no interior locking. Mutating calls
//! need exclusive access (`&mut`); share them across threads through
//! `RoutingIndexService` or your own lock.
//!
//! ## Usage Example
//!
//! ```
//! use attenuated_bloom::{AttenuatedBloomFilter, BloomFilter};
//!
//! let mut filter = BloomFilter::new(65_000, 0.1)?;
//! filter.insert("random");
//! assert!(filter.contains("random"));
//!
//! let mut neighbor = AttenuatedBloomFilter::new(3, 1_000, 0.01)?;
//! neighbor.insert_at(0, "service_x")?;
//! neighbor.shift();
//! assert_eq!(neighbor.contains("service_x"), Some(1));
//! # Ok::<(), attenuated_bloom::FilterError>(())
//! ```

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use domain::{
    AttenuatedBloomFilter, AttenuatedConfig, AttenuatedConfigBuilder, BloomFilter, FilterInfo,
};
pub use error::{ErrorKind, FilterError, PublishError, RoutingError};
pub use ports::{AdvertisementPublisher, RoutingIndexApi};
pub use service::RoutingIndexService;
