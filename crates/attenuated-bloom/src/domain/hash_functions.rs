//! Hash functions for Bloom filter
//!
//! One SipHash-2-4 evaluation with a fixed 128-bit key yields two 64-bit
//! values `(a, b)`. Probe positions come from double hashing:
//! `index_h = (a + h*b) mod m` with wrapping 64-bit arithmetic.

use siphasher::sip128::{Hasher128, SipHasher24};
use std::hash::Hasher;

/// SipHash key, first half
const SIP_K0: u64 = 17_697_571_051_839_533_707;
/// SipHash key, second half
const SIP_K1: u64 = 15_128_385_881_502_100_741;

/// Derive the two base hashes for an element
pub fn base_hashes(element: &[u8]) -> (u64, u64) {
    let mut hasher = SipHasher24::new_with_keys(SIP_K0, SIP_K1);
    hasher.write(element);
    let hash = hasher.finish128();
    (hash.h1, hash.h2)
}

/// Iterator over the bit positions probed for one element
#[derive(Clone, Debug)]
pub struct Probes {
    a: u64,
    b: u64,
    h: u64,
    remaining: usize,
    modulus: u64,
}

impl Iterator for Probes {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.a.wrapping_add(self.h.wrapping_mul(self.b)) % self.modulus;
        self.h += 1;
        self.remaining -= 1;
        Some(index as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Probes {}

/// Probe positions for `element` in a filter of `bit_count` bits
///
/// Yields `probe_count` indices for `h = 0, 1, ..`. `bit_count` must be
/// non-zero.
pub fn probe_positions(element: &[u8], probe_count: usize, bit_count: usize) -> Probes {
    let (a, b) = base_hashes(element);
    Probes {
        a,
        b,
        h: 0,
        remaining: probe_count,
        modulus: bit_count as u64,
    }
}
