//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Packed bit storage
//! - Keyed hashing and probe derivation
//! - Parameter calculations
//! - Standard Bloom filter
//! - Attenuated (hop-layered) Bloom filter
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - No locking; callers synchronize (see `service`)

pub mod attenuated;
pub mod bitset;
pub mod bloom_filter;
pub mod config;
pub mod hash_functions;
pub mod parameters;

pub use attenuated::AttenuatedBloomFilter;
pub use bitset::BitSet;
pub use bloom_filter::{BloomFilter, FilterInfo};
pub use config::{AttenuatedConfig, AttenuatedConfigBuilder};
pub use parameters::{calculate_fpr, calculate_optimal_parameters, FilterParams, WORD_BITS};
