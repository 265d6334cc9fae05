//! Extended binary Golay (24,12,8) error correction for DNA barcodes.
//!
//! Each 12-nucleotide barcode is a 24-bit Golay codeword written two bits per
//! nucleotide. The code has 4096 codewords with pairwise Hamming distance of at
//! least 8, so any pattern of up to three flipped bits can be corrected.
//!
//! This module provides:
//! - Nucleotide <-> codon conversion ([`nucleotide`])
//! - The fixed generator and parity-check matrices ([`matrices`])
//! - The syndrome lookup table for all correctable error patterns ([`syndrome`])
//! - The decoder combining them ([`golay`])
//!
//! # Examples
//!
//! ```rust
//! use golay_barcodes::ecc::GolayDecoder;
//!
//! let decoder = GolayDecoder::shared();
//!
//! let decoded = decoder.decode("GCATCGTCCACA").unwrap();
//! assert_eq!(decoded.corrected.as_deref(), Some("GCATCGTCAACA"));
//! assert_eq!(decoded.errors, 2);
//!
//! // Four or more bit errors cannot be corrected
//! let decoded = decoder.decode("XYZXYZXYZXYZ").unwrap();
//! assert!(decoded.corrected.is_none());
//! assert_eq!(decoded.errors, 4);
//! ```

pub use crate::error::{Error, Result};

/// Number of bits in a codeword
pub const CODEWORD_BITS: usize = 24;

/// Number of message bits in a codeword
pub const MESSAGE_BITS: usize = 12;

/// Mask selecting the 24 codeword bits of a `u32`
pub const CODEWORD_MASK: u32 = 0x00FF_FFFF;

/// Mask selecting the 12 message (or syndrome) bits of a `u16`
pub const MESSAGE_MASK: u16 = 0x0FFF;

/// Largest error weight the code corrects
pub const MAX_CORRECTABLE_ERRORS: u8 = 3;

/// Error count reported for any word the code cannot correct
pub const UNCORRECTABLE: u8 = 4;

pub mod golay;
pub mod matrices;
pub mod nucleotide;
pub mod syndrome;

pub use golay::{Decoded, GolayDecoder};
pub use matrices::GolayMatrices;
pub use nucleotide::BARCODE_LENGTH;
pub use syndrome::{make_3bit_errors, SyndromeTable};
