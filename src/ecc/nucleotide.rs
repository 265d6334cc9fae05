//! Conversion between nucleotides and 2-bit codons.
//!
//! | Nucleotide | Codon |
//! |------------|-------|
//! | A          | 11    |
//! | C          | 00    |
//! | G          | 01    |
//! | T          | 10    |
//!
//! The assignment is fixed: published Golay barcode sets were generated with
//! it, so changing it would turn every valid barcode into an uncorrectable one.
//! Codons are concatenated in reading order, the first nucleotide occupying
//! the two most significant bits of the 24-bit word.

use crate::ecc::CODEWORD_MASK;
use crate::error::{Error, Result};

/// Length of a Golay barcode in nucleotides
pub const BARCODE_LENGTH: usize = 12;

/// Map a nucleotide to its codon, or `None` if the symbol is not one of `A`, `C`, `G`, `T`.
#[inline]
pub fn nt_to_bits(nt: char) -> Option<u8> {
    match nt {
        'A' => Some(0b11),
        'C' => Some(0b00),
        'T' => Some(0b10),
        'G' => Some(0b01),
        _ => None,
    }
}

/// Map a codon back to its nucleotide. Only the two low bits are read.
#[inline]
pub fn bits_to_nt(bits: u8) -> char {
    match bits & 0b11 {
        0b11 => 'A',
        0b00 => 'C',
        0b10 => 'T',
        _ => 'G',
    }
}

/// Convert a 12nt barcode into a 24-bit word.
///
/// Returns the word together with a mask in which bit `i` is set when the
/// character at position `i` could not be mapped; such positions contribute
/// `00` to the word.
///
/// # Errors
///
/// [`Error::BarcodeLength`] when the barcode is not exactly 12 characters long.
pub fn string_to_bits(barcode: &str) -> Result<(u32, u16)> {
    let length = barcode.chars().count();
    if length != BARCODE_LENGTH {
        return Err(Error::BarcodeLength { length });
    }

    let mut word = 0u32;
    let mut unmapped = 0u16;
    for (i, nt) in barcode.chars().enumerate() {
        word <<= 2;
        match nt_to_bits(nt) {
            Some(codon) => word |= codon as u32,
            None => unmapped |= 1 << i,
        }
    }
    Ok((word, unmapped))
}

/// Render the low 24 bits of `word` as a 12nt barcode.
pub fn bits_to_string(word: u32) -> String {
    let word = word & CODEWORD_MASK;
    (0..BARCODE_LENGTH)
        .map(|i| bits_to_nt((word >> (2 * (BARCODE_LENGTH - 1 - i))) as u8))
        .collect()
}

/// Watson-Crick complement of a nucleotide; other symbols are returned unchanged.
#[inline]
pub fn complement(nt: char) -> char {
    match nt {
        'A' => 'T',
        'T' => 'A',
        'C' => 'G',
        'G' => 'C',
        other => other,
    }
}

/// Reverse complement of a sequence.
pub fn reverse_complement(sequence: &str) -> String {
    sequence.chars().rev().map(complement).collect()
}
