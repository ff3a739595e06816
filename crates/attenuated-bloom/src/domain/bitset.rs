//! Fixed-size packed bit vector
//!
//! Bits are stored least-significant first in `u64` words, so bit `i` lives
//! in word `i / 64` at position `i % 64`. That layout is the one exposed to
//! transports through [`BitSet::words`].

use bitvec::prelude::*;

use super::parameters::WORD_BITS;

/// Packed bit vector addressed by a flat bit index
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitSet {
    bits: BitVec<u64, Lsb0>,
}

impl BitSet {
    /// Create an all-zero bit set. `bit_count` must be a multiple of 64.
    pub fn new(bit_count: usize) -> Self {
        debug_assert_eq!(bit_count % WORD_BITS, 0);
        Self {
            bits: bitvec![u64, Lsb0; 0; bit_count],
        }
    }

    /// Wrap existing words; the bit count is `words.len() * 64`
    pub fn from_words(words: Vec<u64>) -> Self {
        Self {
            bits: BitVec::from_vec(words),
        }
    }

    /// Total number of addressable bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the set has no addressable bits at all
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Read the bit at `index`
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.bits[index]
    }

    /// Set the bit at `index`, returning true if it was previously unset
    #[inline]
    pub fn set(&mut self, index: usize) -> bool {
        !self.bits.replace(index, true)
    }

    /// Reset every bit to zero
    pub fn clear(&mut self) {
        self.bits.as_raw_mut_slice().fill(0);
    }

    /// OR `other` into `self` word by word. Lengths must match.
    pub fn union_with(&mut self, other: &BitSet) {
        debug_assert_eq!(self.len(), other.len());
        for (s, o) in self
            .bits
            .as_raw_mut_slice()
            .iter_mut()
            .zip(other.bits.as_raw_slice())
        {
            *s |= *o;
        }
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.bits
            .as_raw_slice()
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum()
    }

    /// Whether no bit is set
    pub fn not_any(&self) -> bool {
        self.bits.as_raw_slice().iter().all(|&w| w == 0)
    }

    /// Packed storage words
    pub fn words(&self) -> &[u64] {
        self.bits.as_raw_slice()
    }
}
