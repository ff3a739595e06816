//! Core Bloom filter implementation
//!
//! INVARIANTS:
//! - `bit_count` is a positive multiple of 64 and `hash_count >= 1`; both are
//!   fixed for the lifetime of the filter
//! - No false negatives: once inserted, `contains()` returns true until
//!   `clear()`

use tracing::{debug, warn};

use super::bitset::BitSet;
use super::hash_functions::probe_positions;
use super::parameters::{calculate_optimal_parameters, FilterParams, WORD_BITS};
use crate::error::FilterError;

/// Read-only diagnostic snapshot of a filter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterInfo {
    /// Number of hash functions
    pub hash_count: usize,
    /// Size in bits
    pub bit_count: usize,
    /// Bits that have transitioned from 0 to 1
    pub set_bit_count: usize,
}

/// Bloom filter for probabilistic membership testing
///
/// False positives are possible, false negatives are not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BloomFilter {
    bits: BitSet,
    /// Size in bits (m)
    bit_count: usize,
    /// Number of hash functions (k)
    hash_count: usize,
    /// Saturation counter, diagnostic only
    set_bit_count: usize,
    /// Insert calls since the last clear, plus those of absorbed filters
    inserted: usize,
}

impl BloomFilter {
    /// Create a filter sized for `expected_elements` at `target_fpr`
    ///
    /// # Errors
    /// `InvalidFalsePositiveRate` unless `0 < target_fpr < 1`,
    /// `CapacityTooLarge` if the optimal size is not addressable.
    pub fn new(expected_elements: usize, target_fpr: f64) -> Result<Self, FilterError> {
        let params = calculate_optimal_parameters(expected_elements, target_fpr)?;
        debug!(
            expected_elements,
            target_fpr,
            bit_count = params.bit_count,
            hash_count = params.hash_count,
            "Sized bloom filter"
        );
        Ok(Self::with_params(params))
    }

    /// Create an empty filter with explicit dimensions
    pub(crate) fn with_params(params: FilterParams) -> Self {
        Self {
            bits: BitSet::new(params.bit_count),
            bit_count: params.bit_count,
            hash_count: params.hash_count,
            set_bit_count: 0,
            inserted: 0,
        }
    }

    /// Rebuild a filter from parts received over a transport
    ///
    /// # Errors
    /// `InvalidParameters` for a zero/unaligned bit count or zero hash count,
    /// `WordCountMismatch` if `words` does not hold exactly `bit_count` bits.
    pub fn from_raw_parts(
        words: Vec<u64>,
        bit_count: usize,
        hash_count: usize,
    ) -> Result<Self, FilterError> {
        if bit_count == 0 || bit_count % WORD_BITS != 0 {
            warn!(bit_count, "Rejected raw filter with unaligned bit count");
            return Err(FilterError::InvalidParameters(format!(
                "bit_count must be a positive multiple of {}, got {}",
                WORD_BITS, bit_count
            )));
        }
        if hash_count == 0 {
            warn!("Rejected raw filter with zero hash count");
            return Err(FilterError::InvalidParameters(
                "hash_count cannot be 0".to_string(),
            ));
        }
        let expected = bit_count / WORD_BITS;
        if words.len() != expected {
            warn!(expected, found = words.len(), "Rejected raw filter words");
            return Err(FilterError::WordCountMismatch {
                expected,
                found: words.len(),
            });
        }

        let bits = BitSet::from_words(words);
        let set_bit_count = bits.count_ones();
        Ok(Self {
            bits,
            bit_count,
            hash_count,
            set_bit_count,
            inserted: 0,
        })
    }

    /// Insert an element into the filter
    pub fn insert<K: AsRef<[u8]>>(&mut self, element: K) {
        for pos in probe_positions(element.as_ref(), self.probe_count(), self.bit_count) {
            if self.bits.set(pos) {
                self.set_bit_count += 1;
            }
        }
        self.inserted += 1;
    }

    /// Test if an element might be in the filter
    ///
    /// Stops at the first unset probe.
    pub fn contains<K: AsRef<[u8]>>(&self, element: K) -> bool {
        probe_positions(element.as_ref(), self.probe_count(), self.bit_count)
            .all(|pos| self.bits.get(pos))
    }

    /// Reset all bits and counters; dimensions are kept
    pub fn clear(&mut self) {
        self.bits.clear();
        self.set_bit_count = 0;
        self.inserted = 0;
    }

    /// Diagnostic snapshot `(hash_count, bit_count, set_bit_count)`
    pub fn info(&self) -> FilterInfo {
        FilterInfo {
            hash_count: self.hash_count,
            bit_count: self.bit_count,
            set_bit_count: self.set_bit_count,
        }
    }

    /// Whether `other` has the same bit and hash counts
    pub fn is_compatible(&self, other: &BloomFilter) -> bool {
        self.bit_count == other.bit_count && self.hash_count == other.hash_count
    }

    /// OR another filter into this one
    ///
    /// # Errors
    /// `DimensionMismatch` if the filters differ in size or hash count; this
    /// filter is left untouched in that case.
    pub fn union_with(&mut self, other: &BloomFilter) -> Result<(), FilterError> {
        self.check_compatible(other)?;
        self.absorb(other);
        Ok(())
    }

    /// OR `other` in without checking dimensions; callers have already
    /// validated them
    pub(crate) fn absorb(&mut self, other: &BloomFilter) {
        debug_assert!(self.is_compatible(other));
        self.bits.union_with(&other.bits);
        self.set_bit_count = self.bits.count_ones();
        self.inserted += other.inserted;
    }

    pub(crate) fn check_compatible(&self, other: &BloomFilter) -> Result<(), FilterError> {
        if self.is_compatible(other) {
            return Ok(());
        }
        Err(FilterError::DimensionMismatch {
            expected: (self.bit_count, self.hash_count),
            found: (other.bit_count, other.hash_count),
        })
    }

    /// Number of positions probed per element
    ///
    /// One more than `hash_count`: probes run over `h = 0..=hash_count`.
    pub fn probe_count(&self) -> usize {
        self.hash_count + 1
    }

    /// Estimated false positive rate at the current load
    ///
    /// Formula: FPR = (ones / m)^k with k = probe count. Read from the bits
    /// themselves, so it stays exact after unions and for filters rebuilt
    /// from raw words.
    pub fn estimated_false_positive_rate(&self) -> f64 {
        let fill = self.bits.count_ones() as f64 / self.bit_count as f64;
        fill.powi(self.probe_count() as i32)
    }

    /// Number of bits currently set
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Whether no bit is set
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Get the filter size in bits
    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    /// Get the number of hash functions
    pub fn hash_count(&self) -> usize {
        self.hash_count
    }

    /// Number of insert calls since creation or the last clear
    ///
    /// Unions add the other filter's count, so keys held by both sides are
    /// counted twice: after a union this is an upper bound on distinct keys.
    pub fn elements_inserted(&self) -> usize {
        self.inserted
    }

    /// Packed storage words, bit `i` at word `i / 64`, position `i % 64`
    pub fn words(&self) -> &[u64] {
        self.bits.words()
    }
}
