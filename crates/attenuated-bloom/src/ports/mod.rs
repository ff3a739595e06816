//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for callers running a routing node
//! - Driven Ports (outbound) - The transport that carries advertisements

pub mod inbound;
pub mod outbound;

pub use inbound::RoutingIndexApi;
pub use outbound::AdvertisementPublisher;
