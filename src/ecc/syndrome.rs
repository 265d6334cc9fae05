//! Syndrome lookup table for the extended Golay code.
//!
//! The code corrects every error pattern of weight at most three. There are
//! C(24,0) + C(24,1) + C(24,2) + C(24,3) = 1 + 24 + 276 + 2024 = 2325 such
//! patterns and, because the minimum distance is 8, no two of them share a
//! syndrome. The table maps each of those syndromes back to its pattern; any
//! other syndrome means four or more bits were flipped.
//!
//! Syndromes are 12 bits wide, so the table is a dense array over all 4096
//! values and a lookup is a single index.

use log::debug;

use crate::ecc::matrices::GolayMatrices;
use crate::ecc::CODEWORD_BITS;
use crate::error::{Error, Result};

/// Number of error patterns of weight 0 through 3 on 24 bits
pub const CORRECTABLE_PATTERNS: usize = 2325;

/// Number of distinct 12-bit syndromes
const SYNDROME_SPACE: usize = 1 << 12;

/// Word with only bit position `i` set, position 0 being the most significant of 24
#[inline]
fn position(i: usize) -> u32 {
    1 << (CODEWORD_BITS - 1 - i)
}

/// All 24-bit error patterns of weight at most 3.
///
/// Patterns are ordered by weight, then lexicographically by their set
/// positions, so the sequence is stable between calls.
pub fn make_3bit_errors() -> Vec<u32> {
    let n = CODEWORD_BITS;
    let mut patterns = Vec::with_capacity(CORRECTABLE_PATTERNS);

    patterns.push(0);
    for i in 0..n {
        patterns.push(position(i));
    }
    for i in 0..n {
        for j in i + 1..n {
            patterns.push(position(i) | position(j));
        }
    }
    for i in 0..n {
        for j in i + 1..n {
            for k in j + 1..n {
                patterns.push(position(i) | position(j) | position(k));
            }
        }
    }

    debug_assert_eq!(patterns.len(), CORRECTABLE_PATTERNS);
    patterns
}

/// Immutable map from syndrome to minimum-weight error pattern.
#[derive(Clone)]
pub struct SyndromeTable {
    patterns: Box<[Option<u32>]>,
    len: usize,
}

impl std::fmt::Debug for SyndromeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyndromeTable")
            .field("len", &self.len)
            .finish()
    }
}

impl SyndromeTable {
    /// Build the table for the given matrices.
    ///
    /// # Errors
    ///
    /// [`Error::SyndromeCollision`] if two patterns of weight at most 3 share a
    /// syndrome, which means `parity_check` does not describe a code able to
    /// correct three errors.
    pub fn new(matrices: &GolayMatrices) -> Result<Self> {
        let mut patterns = vec![None; SYNDROME_SPACE].into_boxed_slice();
        let mut len = 0;

        for error in make_3bit_errors() {
            let syndrome = matrices.syndrome(error);
            let slot = &mut patterns[syndrome as usize];
            if let Some(first) = *slot {
                return Err(Error::SyndromeCollision {
                    syndrome,
                    first,
                    second: error,
                });
            }
            *slot = Some(error);
            len += 1;
        }

        debug!(
            "built syndrome table: {} correctable patterns, {} of {} syndromes unused",
            len,
            SYNDROME_SPACE - len,
            SYNDROME_SPACE
        );

        Ok(SyndromeTable { patterns, len })
    }

    /// Error pattern for `syndrome`, or `None` if no pattern of weight at most 3 produces it
    #[inline]
    pub fn get(&self, syndrome: u16) -> Option<u32> {
        self.patterns.get(syndrome as usize).copied().flatten()
    }

    /// Whether some correctable pattern produces `syndrome`
    #[inline]
    pub fn contains(&self, syndrome: u16) -> bool {
        self.get(syndrome).is_some()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false for a table built from valid matrices
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Syndromes present in the table, in increasing order
    pub fn syndromes(&self) -> impl Iterator<Item = u16> + '_ {
        self.iter().map(|(syndrome, _)| syndrome)
    }

    /// `(syndrome, pattern)` pairs, in increasing syndrome order
    pub fn iter(&self) -> impl Iterator<Item = (u16, u32)> + '_ {
        self.patterns
            .iter()
            .enumerate()
            .filter_map(|(syndrome, pattern)| pattern.map(|e| (syndrome as u16, e)))
    }

    /// Weight of the heaviest pattern in the table, 3 for the Golay code
    pub fn max_weight(&self) -> u8 {
        self.iter()
            .map(|(_, e)| e.count_ones() as u8)
            .max()
            .unwrap_or(0)
    }
}
