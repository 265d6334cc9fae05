//! On-disk layouts of multiplexed sequencing runs.
//!
//! Earth Microbiome Project (EMP) protocol runs come as a directory holding
//! gzipped FASTQ files with fixed names; the barcode reads that feed the Golay
//! decoder live in their own file. Casava-style exports use the Illumina
//! `Undetermined_S0_L001_*` names for the same roles.

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use crate::demux::details::DETAILS_FILENAME;
use crate::error::{Error, Result};

/// What a file in a layout contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    /// Single-end biological reads
    Sequences,
    /// Forward biological reads
    Forward,
    /// Reverse biological reads
    Reverse,
    /// Index (barcode) reads
    Barcodes,
    /// Error correction details table
    Details,
}

/// A directory layout and the files it requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// `sequences.fastq.gz` + `barcodes.fastq.gz`; also known as EMP multiplexed
    EmpSingleEnd,
    /// `forward.fastq.gz` + `reverse.fastq.gz` + `barcodes.fastq.gz`
    EmpPairedEnd,
    /// Casava-named single-end run
    EmpSingleEndCasava,
    /// Casava-named paired-end run
    EmpPairedEndCasava,
    /// Directory holding only `details.tsv`
    ErrorCorrectionDetails,
}

const EMP_SINGLE_END: &[(FileRole, &str)] = &[
    (FileRole::Sequences, "sequences.fastq.gz"),
    (FileRole::Barcodes, "barcodes.fastq.gz"),
];

const EMP_PAIRED_END: &[(FileRole, &str)] = &[
    (FileRole::Forward, "forward.fastq.gz"),
    (FileRole::Reverse, "reverse.fastq.gz"),
    (FileRole::Barcodes, "barcodes.fastq.gz"),
];

const EMP_SINGLE_END_CASAVA: &[(FileRole, &str)] = &[
    (FileRole::Sequences, "Undetermined_S0_L001_R1_001.fastq.gz"),
    (FileRole::Barcodes, "Undetermined_S0_L001_I1_001.fastq.gz"),
];

const EMP_PAIRED_END_CASAVA: &[(FileRole, &str)] = &[
    (FileRole::Forward, "Undetermined_S0_L001_R1_001.fastq.gz"),
    (FileRole::Reverse, "Undetermined_S0_L001_R2_001.fastq.gz"),
    (FileRole::Barcodes, "Undetermined_S0_L001_I1_001.fastq.gz"),
];

const ERROR_CORRECTION_DETAILS: &[(FileRole, &str)] = &[(FileRole::Details, DETAILS_FILENAME)];

impl Layout {
    /// Every layout, most specific first
    pub const ALL: [Layout; 5] = [
        Layout::EmpPairedEndCasava,
        Layout::EmpSingleEndCasava,
        Layout::EmpPairedEnd,
        Layout::EmpSingleEnd,
        Layout::ErrorCorrectionDetails,
    ];

    /// Role and file name of every file the layout requires
    pub fn files(&self) -> &'static [(FileRole, &'static str)] {
        match self {
            Layout::EmpSingleEnd => EMP_SINGLE_END,
            Layout::EmpPairedEnd => EMP_PAIRED_END,
            Layout::EmpSingleEndCasava => EMP_SINGLE_END_CASAVA,
            Layout::EmpPairedEndCasava => EMP_PAIRED_END_CASAVA,
            Layout::ErrorCorrectionDetails => ERROR_CORRECTION_DETAILS,
        }
    }

    /// File name for `role`, if the layout has one
    pub fn file_name(&self, role: FileRole) -> Option<&'static str> {
        self.files()
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, name)| *name)
    }

    /// Whether the layout carries reverse reads
    pub fn is_paired(&self) -> bool {
        self.file_name(FileRole::Reverse).is_some()
    }

    /// Full path of the barcode reads inside `dir`
    pub fn barcodes_path<P: AsRef<Path>>(&self, dir: P) -> Option<PathBuf> {
        self.file_name(FileRole::Barcodes)
            .map(|name| dir.as_ref().join(name))
    }

    /// Check that `dir` contains every required file.
    ///
    /// For [`Layout::ErrorCorrectionDetails`] the table header is validated too.
    pub fn validate<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        for (role, name) in self.files() {
            let path = dir.join(name);
            if !path.is_file() {
                return Err(Error::MissingFile { path });
            }
            if *role == FileRole::Details {
                crate::demux::details::validate_details_file(&path)?;
            }
        }
        Ok(())
    }

    /// The most specific layout whose files are all present in `dir`
    pub fn detect<P: AsRef<Path>>(dir: P) -> Option<Layout> {
        let dir = dir.as_ref();
        Layout::ALL
            .into_iter()
            .find(|layout| layout.files().iter().all(|(_, name)| dir.join(name).is_file()))
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Layout::EmpSingleEnd => "EMPSingleEndDirFmt",
            Layout::EmpPairedEnd => "EMPPairedEndDirFmt",
            Layout::EmpSingleEndCasava => "EMPSingleEndCasavaDirFmt",
            Layout::EmpPairedEndCasava => "EMPPairedEndCasavaDirFmt",
            Layout::ErrorCorrectionDetails => "ErrorCorrectionDetailsDirFmt",
        };
        write!(f, "{}", name)
    }
}
