//! Per-read error correction details.
//!
//! Demultiplexing records, for every read, the raw barcode, the barcode it was
//! corrected to and how many bit errors were fixed. The record is a
//! tab-separated file with a header naming at least the columns in
//! [`REQUIRED_COLUMNS`]; column order is not significant and extra columns are
//! allowed.
//!
//! Values that do not exist for a read (no sample assigned, barcode not
//! correctable) are written as empty fields. A row carries a corrected
//! barcode exactly when its error count is below 4; fields may not contain
//! tabs or line breaks.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::ecc::UNCORRECTABLE;
use crate::error::{Error, Result};

/// File name of the details table inside its directory
pub const DETAILS_FILENAME: &str = "details.tsv";

/// Columns every details header must contain
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "sample",
    "barcode-sequence-id",
    "barcode-uncorrected",
    "barcode-corrected",
    "barcode-errors",
];

/// One row of the details table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionDetail {
    /// Sample the read was assigned to, if any
    pub sample: Option<String>,
    /// Identifier of the barcode read
    pub barcode_sequence_id: String,
    /// Barcode as sequenced
    pub barcode_uncorrected: String,
    /// Barcode after Golay correction, absent if uncorrectable
    pub barcode_corrected: Option<String>,
    /// Bit errors corrected, 4 if uncorrectable
    pub barcode_errors: u8,
}

/// Check a header line.
///
/// # Errors
///
/// [`Error::MissingHeader`] if the line is blank, [`Error::MissingColumn`]
/// naming the first absent column in alphabetical order otherwise.
pub fn validate_header(line: &str) -> Result<()> {
    let line = line.trim();
    if line.is_empty() {
        return Err(Error::MissingHeader);
    }

    let header: Vec<&str> = line.split('\t').collect();
    let mut required = REQUIRED_COLUMNS;
    required.sort_unstable();
    match required.iter().find(|&&column| !header.contains(&column)) {
        Some(column) => Err(Error::MissingColumn(column.to_string())),
        None => Ok(()),
    }
}

/// Check that `reader` starts with a valid details header.
pub fn validate_details<R: BufRead>(mut reader: R) -> Result<()> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    validate_header(&line)
}

/// Check that the file at `path` starts with a valid details header.
pub fn validate_details_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let file = File::open(path.as_ref())?;
    validate_details(BufReader::new(file))
}

/// Positions of the required columns within a header
struct ColumnIndex {
    sample: usize,
    sequence_id: usize,
    uncorrected: usize,
    corrected: usize,
    errors: usize,
    width: usize,
}

impl ColumnIndex {
    fn from_header(line: &str) -> Result<Self> {
        validate_header(line)?;
        // a trailing tab is an empty column
        let header: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
        let position = |name: &str| {
            header
                .iter()
                .position(|column| *column == name)
                .ok_or_else(|| Error::MissingColumn(name.to_string()))
        };
        Ok(ColumnIndex {
            sample: position("sample")?,
            sequence_id: position("barcode-sequence-id")?,
            uncorrected: position("barcode-uncorrected")?,
            corrected: position("barcode-corrected")?,
            errors: position("barcode-errors")?,
            width: header.len(),
        })
    }

    fn parse(&self, line_number: usize, line: &str) -> Result<CorrectionDetail> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != self.width {
            return Err(Error::InvalidRecord {
                line: line_number,
                reason: format!("expected {} fields, found {}", self.width, fields.len()),
            });
        }

        let optional = |value: &str| (!value.is_empty()).then(|| value.to_string());
        let errors = fields[self.errors];
        let barcode_errors = errors.parse::<u8>().map_err(|_| Error::InvalidRecord {
            line: line_number,
            reason: format!("barcode-errors is not a count: {:?}", errors),
        })?;
        if barcode_errors > UNCORRECTABLE {
            return Err(Error::InvalidRecord {
                line: line_number,
                reason: format!(
                    "barcode-errors must be at most {}, found {}",
                    UNCORRECTABLE, barcode_errors
                ),
            });
        }

        let barcode_corrected = optional(fields[self.corrected]);
        if barcode_corrected.is_some() == (barcode_errors == UNCORRECTABLE) {
            return Err(Error::InvalidRecord {
                line: line_number,
                reason: format!(
                    "barcode-corrected must be empty exactly when barcode-errors is {}",
                    UNCORRECTABLE
                ),
            });
        }

        Ok(CorrectionDetail {
            sample: optional(fields[self.sample]),
            barcode_sequence_id: fields[self.sequence_id].to_string(),
            barcode_uncorrected: fields[self.uncorrected].to_string(),
            barcode_corrected,
            barcode_errors,
        })
    }
}

/// Parse a details table. Blank lines after the header are ignored.
pub fn read_details<R: BufRead>(reader: R) -> Result<Vec<CorrectionDetail>> {
    let mut lines = reader.lines();
    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(Error::MissingHeader),
    };
    let columns = ColumnIndex::from_header(&header)?;

    let mut details = Vec::new();
    for (i, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        // header is line 1
        details.push(columns.parse(i + 2, line.trim_end_matches('\r'))?);
    }
    Ok(details)
}

/// Writes a details table, header first.
#[derive(Debug)]
pub struct DetailsWriter<W: Write> {
    inner: W,
    records: usize,
}

impl<W: Write> DetailsWriter<W> {
    /// Wrap `inner` and write the header to it
    pub fn new(mut inner: W) -> Result<Self> {
        writeln!(inner, "{}", REQUIRED_COLUMNS.join("\t"))?;
        Ok(DetailsWriter { inner, records: 0 })
    }

    /// Append one row.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRecord`] if a field contains a tab or line break,
    /// nothing is written in that case.
    pub fn write_record(&mut self, detail: &CorrectionDetail) -> Result<()> {
        let fields = [
            ("sample", detail.sample.as_deref().unwrap_or("")),
            ("barcode-sequence-id", detail.barcode_sequence_id.as_str()),
            ("barcode-uncorrected", detail.barcode_uncorrected.as_str()),
            ("barcode-corrected", detail.barcode_corrected.as_deref().unwrap_or("")),
        ];
        if let Some((column, _)) = fields
            .iter()
            .find(|(_, value)| value.contains(['\t', '\r', '\n']))
        {
            return Err(Error::InvalidRecord {
                // header is line 1
                line: self.records + 2,
                reason: format!("{} contains a tab or line break", column),
            });
        }

        writeln!(
            self.inner,
            "{}\t{}\t{}\t{}\t{}",
            detail.sample.as_deref().unwrap_or(""),
            detail.barcode_sequence_id,
            detail.barcode_uncorrected,
            detail.barcode_corrected.as_deref().unwrap_or(""),
            detail.barcode_errors
        )?;
        self.records += 1;
        Ok(())
    }

    /// Rows written so far
    pub fn records(&self) -> usize {
        self.records
    }

    /// Flush and return the underlying writer
    pub fn into_inner(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn detail(
        sample: Option<&str>,
        id: &str,
        raw: &str,
        corrected: Option<&str>,
        errors: u8,
    ) -> CorrectionDetail {
        CorrectionDetail {
            sample: sample.map(str::to_string),
            barcode_sequence_id: id.to_string(),
            barcode_uncorrected: raw.to_string(),
            barcode_corrected: corrected.map(str::to_string),
            barcode_errors: errors,
        }
    }

    #[test]
    fn test_validate_header() {
        assert!(validate_header(
            "sample\tbarcode-sequence-id\tbarcode-uncorrected\tbarcode-corrected\tbarcode-errors\n"
        )
        .is_ok());

        // Order and extra columns do not matter
        assert!(validate_header(
            "barcode-errors\textra\tbarcode-corrected\tsample\tbarcode-uncorrected\tbarcode-sequence-id"
        )
        .is_ok());
    }

    #[test]
    fn test_validate_header_blank() {
        assert!(matches!(validate_header(""), Err(Error::MissingHeader)));
        assert!(matches!(validate_header("  \t \n"), Err(Error::MissingHeader)));
        assert!(matches!(validate_details(Cursor::new("")), Err(Error::MissingHeader)));
    }

    #[test]
    fn test_validate_header_missing_column() {
        let err = validate_header("sample\tbarcode-sequence-id\tbarcode-uncorrected").unwrap_err();
        // reported in sorted order
        assert!(matches!(&err, Error::MissingColumn(c) if c == "barcode-corrected"));
        assert_eq!(err.to_string(), "barcode-corrected is not a column");

        let err = validate_header(
            "barcode-sequence-id\tbarcode-uncorrected\tbarcode-corrected\tbarcode-errors",
        )
        .unwrap_err();
        assert!(matches!(&err, Error::MissingColumn(c) if c == "sample"));
    }

    #[test]
    fn test_write_then_read() {
        let rows = vec![
            detail(Some("s1"), "read1", "AGCACGAGCCTA", Some("AGCACGAGCCTA"), 0),
            detail(Some("s1"), "read2", "CGCACGAGCCTA", Some("AGCACGAGCCTA"), 2),
            detail(None, "read3", "XYZXYZXYZXYZ", None, 4),
        ];

        let mut writer = DetailsWriter::new(Vec::new()).unwrap();
        for row in &rows {
            writer.write_record(row).unwrap();
        }
        assert_eq!(writer.records(), 3);
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with(
            "sample\tbarcode-sequence-id\tbarcode-uncorrected\tbarcode-corrected\tbarcode-errors\n"
        ));
        assert!(text.contains("\tread3\tXYZXYZXYZXYZ\t\t4\n"));
        assert!(validate_details(Cursor::new(&text)).is_ok());
        assert_eq!(read_details(Cursor::new(&text)).unwrap(), rows);
    }

    #[test]
    fn test_read_reordered_columns() {
        let text = "barcode-errors\tbarcode-corrected\tbarcode-uncorrected\tbarcode-sequence-id\tsample\n\
                    2\tGCATCGTCAACA\tGCATCGTCCACA\tr7\tgut\n\
                    \n";
        let rows = read_details(Cursor::new(text)).unwrap();
        assert_eq!(
            rows,
            vec![detail(Some("gut"), "r7", "GCATCGTCCACA", Some("GCATCGTCAACA"), 2)]
        );
    }

    #[test]
    fn test_read_rejects_bad_rows() {
        let header = REQUIRED_COLUMNS.join("\t");

        let text = format!("{}\ns1\tr1\tAAAA\n", header);
        let err = read_details(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { line: 2, .. }));

        let text = format!("{}\ns1\tr1\tAAAA\tAAAA\tmany\n", header);
        let err = read_details(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { line: 2, .. }));

        // error count out of range
        let text = format!("{}\ns1\tr1\tAGCACGAGCCTA\t\t200\n", header);
        let err = read_details(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { line: 2, .. }));

        // uncorrectable but with a corrected barcode
        let text = format!("{}\ns1\tr1\tAGCACGAGCCTA\tAGCACGAGCCTA\t4\n", header);
        let err = read_details(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { line: 2, .. }));

        // corrected count without a corrected barcode, on the second row
        let text = format!(
            "{}\ns1\tr1\tAGCACGAGCCTA\tAGCACGAGCCTA\t0\ns1\tr2\tCGCACGAGCCTA\t\t2\n",
            header
        );
        let err = read_details(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { line: 3, .. }));
    }

    #[test]
    fn test_write_rejects_separators_in_fields() {
        let mut writer = DetailsWriter::new(Vec::new()).unwrap();
        writer
            .write_record(&detail(Some("s1"), "read1", "AGCACGAGCCTA", Some("AGCACGAGCCTA"), 0))
            .unwrap();

        let tabbed = detail(Some("s1"), "read2\tx", "AGCACGAGCCTA", Some("AGCACGAGCCTA"), 0);
        let err = writer.write_record(&tabbed).unwrap_err();
        assert!(
            matches!(&err, Error::InvalidRecord { line: 3, reason } if reason.starts_with("barcode-sequence-id"))
        );

        let broken = detail(Some("s\n1"), "read3", "AGCACGAGCCTA", None, 4);
        assert!(writer.write_record(&broken).is_err());
        let carriage = detail(None, "read4", "AGCACGAGCCTA\r", None, 4);
        assert!(writer.write_record(&carriage).is_err());

        assert_eq!(writer.records(), 1);
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(read_details(Cursor::new(&text)).unwrap().len(), 1);
    }

    #[test]
    fn test_read_header_with_trailing_empty_column() {
        let text = format!(
            "{}\t\r\ns1\tr1\tAGCACGAGCCTA\tAGCACGAGCCTA\t0\t\r\n",
            REQUIRED_COLUMNS.join("\t")
        );
        let rows = read_details(Cursor::new(text)).unwrap();
        assert_eq!(
            rows,
            vec![detail(Some("s1"), "r1", "AGCACGAGCCTA", Some("AGCACGAGCCTA"), 0)]
        );
    }

    #[test]
    fn test_validate_details_file() {
        let dir = std::env::temp_dir().join(format!("golay-details-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let good = dir.join(DETAILS_FILENAME);
        std::fs::write(&good, format!("{}\n", REQUIRED_COLUMNS.join("\t"))).unwrap();
        assert!(validate_details_file(&good).is_ok());

        let empty = dir.join("empty.tsv");
        std::fs::write(&empty, "").unwrap();
        assert!(matches!(validate_details_file(&empty), Err(Error::MissingHeader)));

        assert!(matches!(
            validate_details_file(dir.join("absent.tsv")),
            Err(Error::Io(_))
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
