//! Barcode correction step of a demultiplexing run.
//!
//! [`BarcodeCorrector`] takes raw barcode reads one at a time, optionally
//! reverse-complements them, runs them through the Golay decoder and keeps a
//! tally of the outcomes. A malformed barcode (wrong length) either skips the
//! read or aborts the run depending on [`LengthMismatchPolicy`].

use log::{info, trace, warn};

use crate::demux::details::CorrectionDetail;
use crate::ecc::golay::{Decoded, GolayDecoder};
use crate::ecc::nucleotide::reverse_complement;
use crate::ecc::UNCORRECTABLE;
use crate::error::{Error, Result};

/// What to do with a barcode that is not 12nt long
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthMismatchPolicy {
    /// Count the read and carry on
    #[default]
    Skip,
    /// Return the length error to the caller
    Abort,
}

/// Configuration for barcode correction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionConfig {
    /// Run Golay error correction; when off barcodes are used as read
    pub golay_correction: bool,
    /// Reverse-complement barcode reads before decoding
    pub reverse_complement: bool,
    /// Handling of barcodes with the wrong length
    pub on_length_mismatch: LengthMismatchPolicy,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            golay_correction: true,
            reverse_complement: false,
            on_length_mismatch: LengthMismatchPolicy::Skip,
        }
    }
}

/// Outcome of correcting one barcode read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    /// Barcode as read, after optional reverse complement
    pub uncorrected: String,
    /// Corrected barcode, absent if uncorrectable
    pub corrected: Option<String>,
    /// Bit errors corrected, 4 if uncorrectable
    pub errors: u8,
}

impl Correction {
    /// Build the details row for this read
    pub fn into_detail<S: Into<String>>(
        self,
        sample: Option<String>,
        sequence_id: S,
    ) -> CorrectionDetail {
        CorrectionDetail {
            sample,
            barcode_sequence_id: sequence_id.into(),
            barcode_uncorrected: self.uncorrected,
            barcode_corrected: self.corrected,
            barcode_errors: self.errors,
        }
    }
}

/// Counts of correction outcomes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionStats {
    /// Barcode reads seen, including skipped ones
    pub reads: u64,
    /// Reads whose barcode was already a codeword
    pub exact: u64,
    /// Reads whose barcode needed 1 to 3 bits corrected
    pub corrected: u64,
    /// Reads whose barcode could not be corrected
    pub uncorrectable: u64,
    /// Reads skipped because the barcode was not 12nt
    pub length_mismatches: u64,
    /// Reads by number of bit errors, index 4 being uncorrectable
    pub errors_histogram: [u64; 5],
}

impl CorrectionStats {
    fn record(&mut self, errors: u8) {
        match errors {
            0 => self.exact += 1,
            UNCORRECTABLE => self.uncorrectable += 1,
            _ => self.corrected += 1,
        }
        self.errors_histogram[errors.min(UNCORRECTABLE) as usize] += 1;
    }

    /// Reads that ended up with a usable barcode
    pub fn assignable(&self) -> u64 {
        self.exact + self.corrected
    }
}

/// Applies Golay correction to a stream of barcode reads.
#[derive(Debug)]
pub struct BarcodeCorrector<'a> {
    decoder: &'a GolayDecoder,
    config: CorrectionConfig,
    stats: CorrectionStats,
}

impl BarcodeCorrector<'static> {
    /// Corrector over the process-wide decoder
    pub fn with_shared_decoder(config: CorrectionConfig) -> Self {
        Self::new(GolayDecoder::shared(), config)
    }
}

impl<'a> BarcodeCorrector<'a> {
    /// Create a corrector
    pub fn new(decoder: &'a GolayDecoder, config: CorrectionConfig) -> Self {
        BarcodeCorrector {
            decoder,
            config,
            stats: CorrectionStats::default(),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &CorrectionConfig {
        &self.config
    }

    /// Outcomes so far
    pub fn stats(&self) -> &CorrectionStats {
        &self.stats
    }

    /// Correct one barcode read.
    ///
    /// Returns `Ok(None)` when the read is skipped for having the wrong length.
    ///
    /// # Errors
    ///
    /// [`Error::BarcodeLength`] under [`LengthMismatchPolicy::Abort`].
    pub fn correct(&mut self, sequence_id: &str, barcode: &str) -> Result<Option<Correction>> {
        self.stats.reads += 1;

        let uncorrected = if self.config.reverse_complement {
            reverse_complement(barcode)
        } else {
            barcode.to_string()
        };

        if !self.config.golay_correction {
            self.stats.record(0);
            return Ok(Some(Correction {
                corrected: Some(uncorrected.clone()),
                uncorrected,
                errors: 0,
            }));
        }

        let decoded = match self.decoder.decode(&uncorrected) {
            Ok(decoded) => decoded,
            Err(Error::BarcodeLength { length }) => {
                self.stats.length_mismatches += 1;
                match self.config.on_length_mismatch {
                    LengthMismatchPolicy::Skip => {
                        warn!(
                            "skipping read {}: barcode {:?} is {}nt, expected 12nt",
                            sequence_id, uncorrected, length
                        );
                        return Ok(None);
                    }
                    LengthMismatchPolicy::Abort => {
                        return Err(Error::BarcodeLength { length });
                    }
                }
            }
            Err(err) => return Err(err),
        };

        let Decoded { corrected, errors } = decoded;
        trace!(
            "read {}: {} -> {} ({} bit errors)",
            sequence_id,
            uncorrected,
            corrected.as_deref().unwrap_or("<uncorrectable>"),
            errors
        );
        self.stats.record(errors);

        Ok(Some(Correction {
            uncorrected,
            corrected,
            errors,
        }))
    }

    /// Correct a read and build its details row in one go
    pub fn correct_detail(
        &mut self,
        sample: Option<String>,
        sequence_id: &str,
        barcode: &str,
    ) -> Result<Option<CorrectionDetail>> {
        Ok(self
            .correct(sequence_id, barcode)?
            .map(|correction| correction.into_detail(sample, sequence_id)))
    }

    /// Log a summary of the outcomes and return the final counts
    pub fn finish(self) -> CorrectionStats {
        let stats = self.stats;
        info!(
            "barcode correction: {} reads, {} exact, {} corrected, {} uncorrectable, {} wrong length",
            stats.reads, stats.exact, stats.corrected, stats.uncorrectable, stats.length_mismatches
        );
        stats
    }
}
