//! Generator and parity-check matrices of the extended binary Golay code.
//!
//! Both matrices are 12×24 over GF(2). Each row is packed into the low 24 bits
//! of a `u32`, column 0 in the most significant position, so a mod-2 dot
//! product between a row and a word is `(row & word).count_ones() & 1`.
//!
//! The generator is in systematic form `G = [I | B]` where `B` is the
//! symmetric 12×12 matrix of the extended Golay code, and the parity-check
//! matrix is `H = [Bᵗ | I]`. Every codeword therefore carries its message in
//! its first 12 bits, and `G · Hᵗ = I·B + B·I = 0 (mod 2)`.

use bitvec::prelude::*;

use crate::ecc::{CODEWORD_BITS, CODEWORD_MASK, MESSAGE_BITS, MESSAGE_MASK};
use crate::error::{Error, Result};

/// Generator matrix `G = [I | B]`
pub const GENERATOR: [u32; 12] = [
    0b100000000000_011111111111,
    0b010000000000_111011100010,
    0b001000000000_110111000101,
    0b000100000000_101110001011,
    0b000010000000_111100010110,
    0b000001000000_111000101101,
    0b000000100000_110001011011,
    0b000000010000_100010110111,
    0b000000001000_100101101110,
    0b000000000100_101011011100,
    0b000000000010_110110111000,
    0b000000000001_101101110001,
];

/// Parity-check matrix `H = [Bᵗ | I]`
pub const PARITY_CHECK: [u32; 12] = [
    0b011111111111_100000000000,
    0b111011100010_010000000000,
    0b110111000101_001000000000,
    0b101110001011_000100000000,
    0b111100010110_000010000000,
    0b111000101101_000001000000,
    0b110001011011_000000100000,
    0b100010110111_000000010000,
    0b100101101110_000000001000,
    0b101011011100_000000000100,
    0b110110111000_000000000010,
    0b101101110001_000000000001,
];

/// The pair of matrices defining a (24,12) binary code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GolayMatrices {
    /// Generator matrix, one 24-bit row per message bit
    pub generator: [u32; 12],
    /// Parity-check matrix, one 24-bit row per syndrome bit
    pub parity_check: [u32; 12],
}

impl Default for GolayMatrices {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl GolayMatrices {
    /// The standard extended Golay matrices used for DNA barcodes
    pub const DEFAULT: GolayMatrices = GolayMatrices {
        generator: GENERATOR,
        parity_check: PARITY_CHECK,
    };

    /// Create a matrix pair, checking that every row fits in 24 bits and that `G · Hᵗ = 0`.
    ///
    /// # Arguments
    ///
    /// * `generator` - Rows of G, first column in bit 23
    /// * `parity_check` - Rows of H, same column order
    ///
    /// # Returns
    ///
    /// The checked pair, or an error if a row is too wide or the matrices are
    /// not orthogonal
    pub fn new(generator: [u32; 12], parity_check: [u32; 12]) -> Result<Self> {
        if let Some(row) = generator
            .iter()
            .chain(parity_check.iter())
            .find(|&&row| row & !CODEWORD_MASK != 0)
        {
            return Err(Error::InputTooLarge {
                length: bit_length(*row),
                max_length: CODEWORD_BITS,
            });
        }

        let matrices = GolayMatrices {
            generator,
            parity_check,
        };
        if !matrices.is_orthogonal() {
            return Err(Error::InvalidInput(
                "Generator and parity-check matrices are not orthogonal (G * H^T != 0 mod 2)"
                    .to_string(),
            ));
        }
        Ok(matrices)
    }

    /// Syndrome of a 24-bit word: `word · Hᵗ mod 2`
    #[inline]
    pub fn syndrome(&self, word: u32) -> u16 {
        mat_vec_mod2(&self.parity_check, word)
    }

    /// Codeword of a 12-bit message: `message · G mod 2`
    #[inline]
    pub fn codeword(&self, message: u16) -> u32 {
        vec_mat_mod2(message, &self.generator)
    }

    /// The 12×12 product `G · Hᵗ mod 2`, row `i` in the low 12 bits of entry `i`
    pub fn product_mod2(&self) -> [u16; 12] {
        let mut product = [0u16; 12];
        for (out, &row) in product.iter_mut().zip(self.generator.iter()) {
            *out = mat_vec_mod2(&self.parity_check, row);
        }
        product
    }

    /// Whether every generator row lies in the null space of the parity-check matrix
    pub fn is_orthogonal(&self) -> bool {
        self.product_mod2().iter().all(|&row| row == 0)
    }
}

/// Parity of the set bits of `x`
#[inline]
pub fn parity(x: u32) -> u32 {
    x.count_ones() & 1
}

/// Product of a 12-row matrix with a 24-bit column vector over GF(2).
///
/// Row `i` contributes bit `11 - i` of the result.
#[inline]
pub fn mat_vec_mod2(rows: &[u32; 12], word: u32) -> u16 {
    rows.iter()
        .fold(0u16, |acc, &row| (acc << 1) | parity(row & word) as u16)
}

/// Product of a 12-bit row vector with a 12-row matrix over GF(2).
///
/// Bit `11 - i` of `vector` selects row `i`; the selected rows are summed (XOR).
#[inline]
pub fn vec_mat_mod2(vector: u16, rows: &[u32; 12]) -> u32 {
    rows.iter()
        .enumerate()
        .filter(|(i, _)| vector >> (MESSAGE_BITS - 1 - i) & 1 == 1)
        .fold(0u32, |acc, (_, &row)| acc ^ row)
}

/// Number of significant bits in `x`
#[inline]
pub(crate) fn bit_length(x: u32) -> usize {
    (u32::BITS - x.leading_zeros()) as usize
}

/// Pack a one-bit-per-element vector into a word, first element most significant.
///
/// # Errors
///
/// [`Error::InvalidInput`] if the slice is not exactly `width` bits long.
pub fn word_from_bits<T, O>(bits: &BitSlice<T, O>, width: usize) -> Result<u32>
where
    T: BitStore,
    O: BitOrder,
{
    if bits.len() != width || width > 32 {
        return Err(Error::InvalidInput(format!(
            "Expected a {}-bit vector, got {} bits",
            width,
            bits.len()
        )));
    }
    Ok(bits.iter().by_vals().fold(0u32, |acc, bit| (acc << 1) | bit as u32))
}

/// Unpack the low `width` bits of `word` into a one-bit-per-element vector,
/// most significant bit first.
pub fn word_to_bits(word: u32, width: usize) -> BitVec<u32, Msb0> {
    let mut bits = BitVec::<u32, Msb0>::with_capacity(width);
    for i in (0..width).rev() {
        bits.push(word >> i & 1 == 1);
    }
    bits
}

/// Message bits of a 24-bit word in the systematic encoding (its first 12 bits).
#[inline]
pub fn message_bits(word: u32) -> u16 {
    ((word & CODEWORD_MASK) >> MESSAGE_BITS) as u16 & MESSAGE_MASK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_parity_check_orthogonal() {
        let matrices = GolayMatrices::default();
        assert_eq!(matrices.product_mod2(), [0u16; 12]);
        assert!(matrices.is_orthogonal());
    }

    #[test]
    fn test_generator_is_systematic() {
        for (i, &row) in GENERATOR.iter().enumerate() {
            assert_eq!(message_bits(row), 1 << (MESSAGE_BITS - 1 - i));
        }
    }

    #[test]
    fn test_minimum_distance_is_eight() {
        let matrices = GolayMatrices::default();
        let min_weight = (1..=MESSAGE_MASK)
            .map(|m| matrices.codeword(m).count_ones())
            .min()
            .unwrap();
        assert_eq!(min_weight, 8);
    }

    #[test]
    fn test_codewords_have_zero_syndrome() {
        let matrices = GolayMatrices::default();
        for message in 0..=MESSAGE_MASK {
            let codeword = matrices.codeword(message);
            assert_eq!(matrices.syndrome(codeword), 0);
            assert_eq!(message_bits(codeword), message);
        }
    }

    #[test]
    fn test_known_codewords() {
        let matrices = GolayMatrices::default();
        assert_eq!(matrices.codeword(0), 0);
        assert_eq!(matrices.codeword(1), 0x00_1B71);
        assert_eq!(matrices.codeword(666), 0x29_AEB2);
        assert_eq!(matrices.codeword(0x0FFF), 0xFF_FFFF);
    }

    #[test]
    fn test_single_bit_syndromes_are_columns_of_h() {
        let matrices = GolayMatrices::default();
        // The right half of H is the identity, so bit j of the check part maps to syndrome bit j
        for j in 0..12 {
            assert_eq!(matrices.syndrome(1 << j), 1 << j);
        }
    }

    #[test]
    fn test_new_rejects_bad_matrices() {
        let mut parity_check = PARITY_CHECK;
        parity_check[0] ^= 1 << 23;
        let err = GolayMatrices::new(GENERATOR, parity_check).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let mut generator = GENERATOR;
        generator[3] |= 1 << 24;
        let err = GolayMatrices::new(generator, PARITY_CHECK).unwrap_err();
        assert!(matches!(
            err,
            Error::InputTooLarge {
                length: 25,
                max_length: 24
            }
        ));

        assert!(GolayMatrices::new(GENERATOR, PARITY_CHECK).is_ok());
    }

    #[test]
    fn test_bitvec_conversion() {
        let bits = bitvec![u8, Msb0; 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
                                    1, 0, 1, 1, 0, 1, 1, 1, 0, 0, 0, 1];
        assert_eq!(word_from_bits(&bits, CODEWORD_BITS).unwrap(), 0x00_1B71);
        assert_eq!(word_to_bits(0x00_1B71, CODEWORD_BITS).as_bitslice(), bits.as_bitslice());

        let short = bitvec![u8, Msb0; 1; 23];
        assert!(word_from_bits(&short, CODEWORD_BITS).is_err());
    }
}
