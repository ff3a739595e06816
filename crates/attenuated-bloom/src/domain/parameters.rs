//! Optimal Bloom filter parameter calculation
//!
//! Formulas:
//! - m = ceil(-n*ln(p) / (ln(2)^2)), rounded up to a whole number of words
//! - k = floor(-ln(p) / ln(2)), at least 1
//!
//! `k` counts hash functions. Filters probe `k + 1` positions per key (see
//! [`BloomFilter::probe_count`](super::BloomFilter::probe_count)), which is
//! what brings the effective probe count back up to the theoretical optimum.

use std::f64::consts::LN_2;

use bitvec::prelude::*;

use crate::error::FilterError;

/// Width of one storage word in bits
pub const WORD_BITS: usize = u64::BITS as usize;

/// Sizing of a single Bloom filter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterParams {
    /// Number of bits in the filter, a positive multiple of [`WORD_BITS`]
    pub bit_count: usize,
    /// Number of hash functions
    pub hash_count: usize,
}

impl FilterParams {
    /// Number of storage words backing `bit_count` bits
    pub fn word_count(&self) -> usize {
        self.bit_count / WORD_BITS
    }
}

/// Check that a false positive rate lies strictly inside (0, 1)
pub fn validate_fpr(target_fpr: f64) -> Result<(), FilterError> {
    // Written as a negated range check so NaN is rejected too
    if !(target_fpr > 0.0 && target_fpr < 1.0) {
        return Err(FilterError::InvalidFalsePositiveRate { fpr: target_fpr });
    }
    Ok(())
}

/// Calculate optimal Bloom filter parameters for given constraints
///
/// # Arguments
/// * `num_elements` - Expected number of elements to insert (n)
/// * `target_fpr` - Target false positive rate, strictly between 0 and 1
///
/// An empty filter (`n = 0`) still gets one word so probe indices always
/// have a non-zero modulus.
pub fn calculate_optimal_parameters(
    num_elements: usize,
    target_fpr: f64,
) -> Result<FilterParams, FilterError> {
    validate_fpr(target_fpr)?;

    let ln_p = target_fpr.ln();
    let optimal_bits = (-(num_elements as f64) * ln_p / (LN_2 * LN_2)).ceil();

    let max_bits = BitSlice::<u64, Lsb0>::MAX_BITS - WORD_BITS;
    if !optimal_bits.is_finite() || optimal_bits > max_bits as f64 {
        return Err(FilterError::CapacityTooLarge {
            capacity: num_elements,
        });
    }

    let bit_count = (optimal_bits as usize).div_ceil(WORD_BITS).max(1) * WORD_BITS;

    let hash_count = (-(ln_p / LN_2).ceil()) as usize;
    let hash_count = hash_count.max(1);

    Ok(FilterParams {
        bit_count,
        hash_count,
    })
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k, where `k` is the number of probed
/// positions per key.
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
