//! # Attenuated Bloom Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # criterion benchmarks for filter operations
//! └── src/integration/  # multi-node propagation and concurrency flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p attenuated-bloom-tests
//!
//! # With logs
//! RUST_LOG=attenuated_bloom=debug cargo test -p attenuated-bloom-tests -- --nocapture
//!
//! # Benchmarks
//! cargo bench -p attenuated-bloom-tests
//! ```
