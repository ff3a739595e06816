//! Error types for Bloom and attenuated Bloom filters

use thiserror::Error;

/// Coarse classification of a [`FilterError`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Construction parameter out of its valid domain
    InvalidParameter,
    /// Layer index or filter dimensions do not line up
    IndexOutOfRange,
}

/// Errors that can occur when building or combining filters
#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("Invalid false positive rate: {fpr} (must be strictly between 0 and 1)")]
    InvalidFalsePositiveRate { fpr: f64 },

    #[error("Capacity too large to size a filter: {capacity}")]
    CapacityTooLarge { capacity: usize },

    #[error("Attenuated filter depth must be at least 1")]
    ZeroDepth,

    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),

    #[error("Layer out of range: {layer} >= depth {depth}")]
    LayerOutOfRange { layer: usize, depth: usize },

    #[error("Filter dimensions differ: expected {expected:?} (bits, hashes), found {found:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Attenuated filter depths differ: expected {expected}, found {found}")]
    DepthMismatch { expected: usize, found: usize },

    #[error("Word count does not match bit count: expected {expected}, found {found}")]
    WordCountMismatch { expected: usize, found: usize },
}

impl FilterError {
    /// Classify this error as a parameter or an indexing failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFalsePositiveRate { .. }
            | Self::CapacityTooLarge { .. }
            | Self::ZeroDepth
            | Self::InvalidParameters(_) => ErrorKind::InvalidParameter,
            Self::LayerOutOfRange { .. }
            | Self::DimensionMismatch { .. }
            | Self::DepthMismatch { .. }
            | Self::WordCountMismatch { .. } => ErrorKind::IndexOutOfRange,
        }
    }
}

/// Errors reported by an [`AdvertisementPublisher`](crate::ports::AdvertisementPublisher)
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Transport unavailable: {0}")]
    Unavailable(String),

    #[error("Advertisement rejected: {0}")]
    Rejected(String),
}

/// Errors from a routing index propagation round
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),
}
