//! Attenuated Bloom filter
//!
//! A stack of `depth` equally sized Bloom filters. Layer `i` holds items
//! known to be reachable `i` hops away; layer 0 is the local node.
//!
//! A propagation round is: [`merge`](AttenuatedBloomFilter::merge) every
//! neighbor advertisement, then [`shift`](AttenuatedBloomFilter::shift) so
//! the result reads one hop farther before it is re-broadcast.
//!
//! INVARIANTS:
//! - `depth >= 1` and every layer is a fully sized filter
//! - all layers share one `(bit_count, hash_count)`
//! - failed operations leave every layer untouched

use tracing::{debug, trace, warn};

use super::bloom_filter::{BloomFilter, FilterInfo};
use super::config::AttenuatedConfig;
use super::parameters::calculate_optimal_parameters;
use crate::error::FilterError;

/// Layered Bloom filter encoding hop distance alongside membership
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttenuatedBloomFilter {
    layers: Vec<BloomFilter>,
}

impl AttenuatedBloomFilter {
    /// Create `depth` empty layers, each sized for `layer_capacity` elements
    /// at `layer_fpr`
    ///
    /// # Errors
    /// `ZeroDepth` for `depth == 0`, or any sizing error from
    /// [`BloomFilter::new`].
    pub fn new(depth: usize, layer_capacity: usize, layer_fpr: f64) -> Result<Self, FilterError> {
        if depth == 0 {
            return Err(FilterError::ZeroDepth);
        }
        let params = calculate_optimal_parameters(layer_capacity, layer_fpr)?;
        debug!(
            depth,
            layer_capacity,
            layer_fpr,
            bit_count = params.bit_count,
            hash_count = params.hash_count,
            "Sized attenuated bloom filter"
        );
        Ok(Self {
            layers: vec![BloomFilter::with_params(params); depth],
        })
    }

    /// Create from a validated configuration
    pub fn from_config(config: &AttenuatedConfig) -> Result<Self, FilterError> {
        config.validate()?;
        Self::new(config.depth, config.layer_capacity, config.layer_fpr)
    }

    /// Assemble from layers received over a transport
    ///
    /// # Errors
    /// `ZeroDepth` for an empty vector, `DimensionMismatch` if any layer
    /// differs from layer 0.
    pub fn from_layers(layers: Vec<BloomFilter>) -> Result<Self, FilterError> {
        let Some(first) = layers.first() else {
            return Err(FilterError::ZeroDepth);
        };
        for layer in &layers[1..] {
            if let Err(err) = first.check_compatible(layer) {
                warn!(%err, "Rejected attenuated layers");
                return Err(err);
            }
        }
        Ok(Self { layers })
    }

    /// Record `element` as known at hop distance `layer`
    ///
    /// # Errors
    /// `LayerOutOfRange` if `layer >= depth`.
    pub fn insert_at<K: AsRef<[u8]>>(
        &mut self,
        layer: usize,
        element: K,
    ) -> Result<(), FilterError> {
        let depth = self.depth();
        let filter = self
            .layers
            .get_mut(layer)
            .ok_or(FilterError::LayerOutOfRange { layer, depth })?;
        filter.insert(element);
        Ok(())
    }

    /// OR a standalone filter into one layer
    ///
    /// # Errors
    /// `LayerOutOfRange` or `DimensionMismatch`.
    pub fn merge_layer(&mut self, layer: usize, filter: &BloomFilter) -> Result<(), FilterError> {
        let depth = self.depth();
        self.layers
            .get_mut(layer)
            .ok_or(FilterError::LayerOutOfRange { layer, depth })?
            .union_with(filter)
    }

    /// Smallest layer whose filter matches `element`
    ///
    /// Each layer can false-positive, so the distance may be an
    /// underestimate with probability bounded by the layer FPR.
    pub fn contains<K: AsRef<[u8]>>(&self, element: K) -> Option<usize> {
        let element = element.as_ref();
        self.layers.iter().position(|layer| layer.contains(element))
    }

    /// Push every layer one hop outward
    ///
    /// Layer `i` takes over the contents of layer `i - 1` for `i` from
    /// `depth - 1` down to 1, the outermost contents fall off, and layer 0
    /// is left empty for fresh local advertisements.
    pub fn shift(&mut self) {
        // Layers share dimensions: rotate + clear is a copy up by one
        self.layers.rotate_right(1);
        self.layers[0].clear();
        trace!(depth = self.depth(), "Shifted attenuated filter");
    }

    /// OR a neighbor's attenuated filter into this one, layer by layer
    ///
    /// # Errors
    /// `DepthMismatch` or `DimensionMismatch`; all layers are checked before
    /// any is modified.
    pub fn merge(&mut self, other: &AttenuatedBloomFilter) -> Result<(), FilterError> {
        if let Err(err) = self.check_compatible(other) {
            warn!(%err, "Rejected attenuated filter merge");
            return Err(err);
        }
        for (mine, theirs) in self.layers.iter_mut().zip(&other.layers) {
            mine.absorb(theirs);
        }
        trace!(depth = self.depth(), "Merged attenuated filter");
        Ok(())
    }

    fn check_compatible(&self, other: &AttenuatedBloomFilter) -> Result<(), FilterError> {
        if self.depth() != other.depth() {
            return Err(FilterError::DepthMismatch {
                expected: self.depth(),
                found: other.depth(),
            });
        }
        self.layers[0].check_compatible(&other.layers[0])
    }

    /// Clear every layer
    pub fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.clear();
        }
    }

    /// Number of layers
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, index: usize) -> Option<&BloomFilter> {
        self.layers.get(index)
    }

    pub fn layers(&self) -> &[BloomFilter] {
        &self.layers
    }

    /// Diagnostic snapshot of each layer, innermost first
    pub fn layer_info(&self) -> Vec<FilterInfo> {
        self.layers.iter().map(BloomFilter::info).collect()
    }

    /// Whether every layer is empty
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(BloomFilter::is_empty)
    }
}
