//! Interfaces between the Golay decoder and a demultiplexing pipeline.
//!
//! - [`correct`]: per-read barcode correction with outcome statistics
//! - [`details`]: the tab-separated record of every correction decision
//! - [`layout`]: file naming of multiplexed EMP and Casava runs
//!
//! Reading FASTQ files and assigning reads to samples happen outside this crate.

pub mod correct;
pub mod details;
pub mod layout;

pub use correct::{
    BarcodeCorrector, Correction, CorrectionConfig, CorrectionStats, LengthMismatchPolicy,
};
pub use details::{
    read_details, validate_details, validate_details_file, validate_header, CorrectionDetail,
    DetailsWriter, DETAILS_FILENAME, REQUIRED_COLUMNS,
};
pub use layout::{FileRole, Layout};
