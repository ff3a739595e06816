//! Service Layer
//!
//! Runs propagation rounds over a shared attenuated filter.

pub mod routing_index_service;

pub use routing_index_service::RoutingIndexService;
