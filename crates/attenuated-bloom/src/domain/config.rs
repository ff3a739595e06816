//! Attenuated filter configuration and validation
//!
//! # Example
//!
//! ```
//! use attenuated_bloom::domain::AttenuatedConfigBuilder;
//!
//! let config = AttenuatedConfigBuilder::new()
//!     .depth(4)
//!     .layer_capacity(5_000)
//!     .layer_fpr(0.02)
//!     .build()
//!     .expect("Valid config");
//! assert_eq!(config.depth, 4);
//! ```

use serde::{Deserialize, Serialize};

use super::parameters::{calculate_optimal_parameters, validate_fpr};
use crate::error::FilterError;

/// Sizing for an attenuated Bloom filter
///
/// Every layer is sized identically so layers can be shifted and merged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttenuatedConfig {
    /// Number of hop layers (at least 1)
    pub depth: usize,
    /// Expected elements per layer
    pub layer_capacity: usize,
    /// Target false positive rate per layer, strictly between 0 and 1
    pub layer_fpr: f64,
}

impl Default for AttenuatedConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            layer_capacity: 1_000,
            layer_fpr: 0.01,
        }
    }
}

impl AttenuatedConfig {
    /// Create a new configuration with validation
    pub fn new(depth: usize, layer_capacity: usize, layer_fpr: f64) -> Result<Self, FilterError> {
        let config = Self {
            depth,
            layer_capacity,
            layer_fpr,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject zero depth, out-of-range FPR and unaddressable capacity
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.depth == 0 {
            return Err(FilterError::ZeroDepth);
        }
        validate_fpr(self.layer_fpr)?;
        calculate_optimal_parameters(self.layer_capacity, self.layer_fpr)?;
        Ok(())
    }
}

/// Builder for AttenuatedConfig with validation
///
/// Unset fields fall back to [`AttenuatedConfig::default`].
#[derive(Default)]
pub struct AttenuatedConfigBuilder {
    depth: Option<usize>,
    layer_capacity: Option<usize>,
    layer_fpr: Option<f64>,
}

impl AttenuatedConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set number of hop layers
    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Set expected elements per layer
    pub fn layer_capacity(mut self, capacity: usize) -> Self {
        self.layer_capacity = Some(capacity);
        self
    }

    /// Set per-layer false positive rate
    pub fn layer_fpr(mut self, fpr: f64) -> Self {
        self.layer_fpr = Some(fpr);
        self
    }

    /// Build the AttenuatedConfig, validating all parameters
    pub fn build(self) -> Result<AttenuatedConfig, FilterError> {
        let defaults = AttenuatedConfig::default();

        let config = AttenuatedConfig {
            depth: self.depth.unwrap_or(defaults.depth),
            layer_capacity: self.layer_capacity.unwrap_or(defaults.layer_capacity),
            layer_fpr: self.layer_fpr.unwrap_or(defaults.layer_fpr),
        };

        config.validate()?;
        Ok(config)
    }
}
