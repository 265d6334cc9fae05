//! Golay decoder for 12nt DNA barcodes.
//!
//! [`GolayDecoder`] bundles the fixed code matrices with the syndrome table
//! derived from them. Building the table costs 2325 syndrome computations, so
//! a decoder should be built once and shared; [`GolayDecoder::shared`] hands
//! out a process-wide instance. Decoding never mutates the decoder and is safe
//! to call from any number of threads.
//!
//! Decoding a received word:
//!
//! 1. Compute its syndrome `s = r · Hᵗ`.
//! 2. `s == 0`: the word is a codeword, zero errors.
//! 3. `s` is in the table with pattern `e`: the codeword is `r ^ e` and
//!    `weight(e)` bits were wrong.
//! 4. Otherwise at least four bits were flipped. The code cannot pick a
//!    unique nearest codeword, so nothing is returned and the error count is
//!    reported as 4.

use std::sync::OnceLock;

use bitvec::prelude::*;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::ecc::matrices::{self, bit_length, GolayMatrices};
use crate::ecc::nucleotide::{bits_to_string, string_to_bits};
use crate::ecc::syndrome::{self, SyndromeTable};
use crate::ecc::{CODEWORD_BITS, CODEWORD_MASK, MESSAGE_BITS, MESSAGE_MASK, UNCORRECTABLE};
use crate::error::{Error, Result};

/// Outcome of decoding a word or barcode.
///
/// `corrected` is `None` when the input could not be corrected, in which case
/// `errors` is [`UNCORRECTABLE`]; it is a sentinel, not a count of the bits that
/// were actually wrong.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decoded<T> {
    /// The nearest codeword, if it is within three bit errors
    pub corrected: Option<T>,
    /// Number of bits corrected, 0 to 3, or 4 if uncorrectable
    pub errors: u8,
}

impl<T> Decoded<T> {
    /// A successfully decoded value with `errors` corrected bits
    pub fn corrected(value: T, errors: u8) -> Self {
        Decoded {
            corrected: Some(value),
            errors,
        }
    }

    /// The uncorrectable outcome
    pub fn uncorrectable() -> Self {
        Decoded {
            corrected: None,
            errors: UNCORRECTABLE,
        }
    }

    /// Whether a codeword was recovered
    pub fn is_corrected(&self) -> bool {
        self.corrected.is_some()
    }

    /// Whether the input already was a codeword
    pub fn is_exact(&self) -> bool {
        self.is_corrected() && self.errors == 0
    }

    /// Apply `f` to the corrected value, keeping the error count
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Decoded<U> {
        Decoded {
            corrected: self.corrected.map(f),
            errors: self.errors,
        }
    }

    /// Split into `(corrected, errors)`
    pub fn into_parts(self) -> (Option<T>, u8) {
        (self.corrected, self.errors)
    }
}

/// Extended binary Golay (24,12,8) encoder and decoder.
#[derive(Debug, Clone)]
pub struct GolayDecoder {
    matrices: GolayMatrices,
    table: SyndromeTable,
}

impl Default for GolayDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl GolayDecoder {
    /// Create a decoder for the standard barcode code.
    ///
    /// # Panics
    ///
    /// If the built-in matrices do not yield a collision-free syndrome table,
    /// which would mean the constants themselves are corrupt.
    pub fn new() -> Self {
        Self::with_matrices(GolayMatrices::DEFAULT)
            .expect("built-in Golay matrices must produce a collision-free syndrome table")
    }

    /// Create a decoder from an explicit matrix pair.
    ///
    /// The matrices are checked for orthogonality and the syndrome table for
    /// collisions before the decoder is returned.
    ///
    /// # Arguments
    ///
    /// * `matrices` - Generator and parity-check matrix pair
    ///
    /// # Returns
    ///
    /// A decoder over `matrices`, or an error if the pair is malformed or two
    /// correctable patterns share a syndrome
    pub fn with_matrices(matrices: GolayMatrices) -> Result<Self> {
        let matrices = GolayMatrices::new(matrices.generator, matrices.parity_check)?;
        let table = SyndromeTable::new(&matrices)?;
        Ok(GolayDecoder { matrices, table })
    }

    /// Process-wide decoder, built on first use
    pub fn shared() -> &'static GolayDecoder {
        static DECODER: OnceLock<GolayDecoder> = OnceLock::new();
        DECODER.get_or_init(GolayDecoder::new)
    }

    /// The generator and parity-check matrices
    pub fn matrices(&self) -> &GolayMatrices {
        &self.matrices
    }

    /// The syndrome lookup table
    pub fn syndrome_table(&self) -> &SyndromeTable {
        &self.table
    }

    /// The error patterns the syndrome table was built from
    pub fn make_3bit_errors(&self) -> Vec<u32> {
        syndrome::make_3bit_errors()
    }

    /// Encode a 12-bit message into its 24-bit codeword.
    ///
    /// # Arguments
    ///
    /// * `message` - Message in the low 12 bits
    ///
    /// # Returns
    ///
    /// The codeword in the low 24 bits, message bits first
    ///
    /// # Errors
    ///
    /// [`Error::InputTooLarge`] if `message` has bits set above the low 12.
    pub fn encode(&self, message: u16) -> Result<u32> {
        if message & !MESSAGE_MASK != 0 {
            return Err(Error::InputTooLarge {
                length: bit_length(message as u32),
                max_length: MESSAGE_BITS,
            });
        }
        Ok(self.matrices.codeword(message))
    }

    /// Encode a 12-bit message straight into its 12nt barcode
    pub fn encode_barcode(&self, message: u16) -> Result<String> {
        self.encode(message).map(bits_to_string)
    }

    /// The 12 message bits carried by a codeword
    pub fn message_of(&self, codeword: u32) -> u16 {
        matrices::message_bits(codeword)
    }

    /// Syndrome of a 24-bit word
    #[inline]
    pub fn syndrome(&self, word: u32) -> u16 {
        self.matrices.syndrome(word)
    }

    /// Decode a received 24-bit word.
    ///
    /// # Arguments
    ///
    /// * `received` - Word in the low 24 bits, possibly corrupted
    ///
    /// # Returns
    ///
    /// The nearest codeword and the number of bits flipped to reach it, or
    /// an uncorrectable result if more than 3 bits are wrong
    ///
    /// # Errors
    ///
    /// [`Error::InputTooLarge`] if `received` has bits set above the low 24.
    pub fn decode_bits(&self, received: u32) -> Result<Decoded<u32>> {
        if received & !CODEWORD_MASK != 0 {
            return Err(Error::InputTooLarge {
                length: bit_length(received),
                max_length: CODEWORD_BITS,
            });
        }
        Ok(self.correct(received))
    }

    /// Decode a received word given as 24 individual bits, first bit most significant
    pub fn decode_bit_slice<T, O>(&self, bits: &BitSlice<T, O>) -> Result<Decoded<u32>>
    where
        T: BitStore,
        O: BitOrder,
    {
        let word = matrices::word_from_bits(bits, CODEWORD_BITS)?;
        Ok(self.correct(word))
    }

    /// Decode a 12nt barcode.
    ///
    /// A barcode containing anything other than `A`, `C`, `G` or `T` is
    /// reported as uncorrectable.
    ///
    /// # Arguments
    ///
    /// * `barcode` - Barcode read, first nucleotide first
    ///
    /// # Returns
    ///
    /// The corrected barcode and the number of bit errors fixed
    ///
    /// # Errors
    ///
    /// [`Error::BarcodeLength`] if the barcode is not exactly 12 characters long.
    pub fn decode(&self, barcode: &str) -> Result<Decoded<String>> {
        let (word, unmapped) = string_to_bits(barcode)?;
        if unmapped != 0 {
            return Ok(Decoded::uncorrectable());
        }
        Ok(self.correct(word).map(bits_to_string))
    }

    /// Decode a batch of barcodes on the rayon thread pool, preserving their order.
    #[cfg(feature = "parallel")]
    pub fn decode_many<S>(&self, barcodes: &[S]) -> Vec<Result<Decoded<String>>>
    where
        S: AsRef<str> + Sync,
    {
        barcodes
            .par_iter()
            .map(|barcode| self.decode(barcode.as_ref()))
            .collect()
    }

    /// Decode a batch of barcodes, preserving their order.
    #[cfg(not(feature = "parallel"))]
    pub fn decode_many<S>(&self, barcodes: &[S]) -> Vec<Result<Decoded<String>>>
    where
        S: AsRef<str> + Sync,
    {
        barcodes
            .iter()
            .map(|barcode| self.decode(barcode.as_ref()))
            .collect()
    }

    #[inline]
    fn correct(&self, received: u32) -> Decoded<u32> {
        let syndrome = self.matrices.syndrome(received);
        if syndrome == 0 {
            return Decoded::corrected(received, 0);
        }
        match self.table.get(syndrome) {
            Some(error) => Decoded::corrected(received ^ error, error.count_ones() as u8),
            None => Decoded::uncorrectable(),
        }
    }
}
