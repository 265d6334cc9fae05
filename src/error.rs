//! Error types shared across the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the Golay decoder and the demultiplexing interfaces around it.
///
/// An uncorrectable barcode is *not* an error; it is reported through
/// [`Decoded`](crate::ecc::golay::Decoded) with no corrected value.
#[derive(Debug, Error)]
pub enum Error {
    /// Generic invalid argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A word or message wider than the code allows
    #[error("Input too large: {length} bits exceeds the maximum of {max_length}")]
    InputTooLarge { length: usize, max_length: usize },

    /// A barcode string that is not exactly 12 nucleotides long
    #[error("Barcode must be 12nt long, observed barcode of length {length}nt.")]
    BarcodeLength { length: usize },

    /// Two low-weight error patterns share a syndrome, so the parity-check matrix is malformed
    #[error(
        "Syndrome {syndrome:#05x} is produced by both {first:#08x} and {second:#08x}; \
         parity-check matrix does not define a 3-error-correcting code"
    )]
    SyndromeCollision { syndrome: u16, first: u32, second: u32 },

    /// Details file is empty or its first line is blank
    #[error("Failed to locate header.")]
    MissingHeader,

    /// Details header lacks a required column
    #[error("{0} is not a column")]
    MissingColumn(String),

    /// A directory layout is missing one of its files
    #[error("Missing required file: {}", path.display())]
    MissingFile { path: PathBuf },

    /// A details row that cannot be parsed
    #[error("Invalid record on line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
