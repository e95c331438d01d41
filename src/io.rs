use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, VmError};
use crate::stats::StatsReport;
use crate::translation::TranslationRecord;

/// A line that could not be read as an address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    pub text: String,
}

/// Logical addresses read from an input file, in order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputBatch {
    pub addresses: Vec<u32>,
    pub skipped: Vec<SkippedLine>,
}

impl InputBatch {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read(path.as_ref()).map_err(|source| VmError::InputUnreadable {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Ok(Self::parse_bytes(&content))
    }

    pub fn parse(content: &str) -> Self {
        Self::parse_bytes(content.as_bytes())
    }

    /// Parse one decimal address per line.
    ///
    /// Blank lines are ignored. Lines that are not valid UTF-8 or not a
    /// decimal in `u32` range are skipped and collected in `skipped`; values
    /// above the 16-bit address space but within `u32` are kept.
    pub fn parse_bytes(content: &[u8]) -> Self {
        let mut batch = InputBatch::default();

        for (idx, raw) in content.split(|&b| b == b'\n').enumerate() {
            let parsed = std::str::from_utf8(raw).map(str::trim);
            if matches!(parsed, Ok("")) {
                continue;
            }
            match parsed.ok().and_then(|token| token.parse::<u32>().ok()) {
                Some(address) => batch.addresses.push(address),
                None => batch.skipped.push(SkippedLine {
                    line: idx + 1,
                    text: String::from_utf8_lossy(raw).trim().to_string(),
                }),
            }
        }

        batch
    }
}

/// Writes `logical,physical,value` records followed by the rate summary
pub struct OutputWriter<W: Write> {
    inner: BufWriter<W>,
}

impl OutputWriter<File> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref()).map_err(|source| VmError::OutputUnwritable {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> OutputWriter<W> {
    pub fn new(inner: W) -> Self {
        OutputWriter {
            inner: BufWriter::new(inner),
        }
    }

    pub fn write_record(&mut self, record: &TranslationRecord) -> Result<()> {
        writeln!(self.inner, "{}", record.to_output())?;
        Ok(())
    }

    /// Push buffered records to the destination
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Append the rate summary and hand back the destination
    pub fn finish(mut self, report: &StatsReport) -> Result<W> {
        write!(self.inner, "{}", report)?;
        self.inner
            .into_inner()
            .map_err(|e| VmError::OutputWrite(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Counters;
    use crate::translation::{Access, LogicalAddress};

    #[test]
    fn test_parse_one_address_per_line() {
        let batch = InputBatch::parse("16916\n62493\n30198\n");
        assert_eq!(batch.addresses, vec![16916, 62493, 30198]);
        assert!(batch.skipped.is_empty());
    }

    #[test]
    fn test_parse_ignores_blank_lines_and_whitespace() {
        let batch = InputBatch::parse("  16916  \n\n\t\n62493\r\n");
        assert_eq!(batch.addresses, vec![16916, 62493]);
        assert!(batch.skipped.is_empty());
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let batch = InputBatch::parse("1\nabc\n-5\n2\n12x\n99999999999\n");
        assert_eq!(batch.addresses, vec![1, 2]);

        let lines: Vec<usize> = batch.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![2, 3, 5, 6]);
        assert_eq!(batch.skipped[0].text, "abc");
    }

    #[test]
    fn test_parse_keeps_oversized_addresses() {
        let batch = InputBatch::parse("65536\n4294967295\n");
        assert_eq!(batch.addresses, vec![65536, u32::MAX]);
    }

    #[test]
    fn test_parse_skips_invalid_utf8_line() {
        let batch = InputBatch::parse_bytes(b"16916\n\xff\xfe\n62493\n");
        assert_eq!(batch.addresses, vec![16916, 62493]);
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].line, 2);
        assert_eq!(batch.skipped[0].text, "\u{FFFD}\u{FFFD}");
    }

    #[test]
    fn test_from_file_with_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("addresses.txt");
        fs::write(&path, b"16916\n\xff\xfe\n62493\n").unwrap();

        let batch = InputBatch::from_file(&path).unwrap();
        assert_eq!(batch.addresses, vec![16916, 62493]);
        assert_eq!(batch.skipped[0].line, 2);
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(InputBatch::parse(""), InputBatch::default());
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = InputBatch::from_file(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, VmError::InputUnreadable { .. }));
    }

    #[test]
    fn test_writer_records_and_summary() {
        let mut out = OutputWriter::new(Vec::new());
        out.write_record(&TranslationRecord {
            logical: LogicalAddress::from_raw(16916),
            frame: 0,
            physical: 20,
            value: 0,
            access: Access::PageFault,
        })
        .unwrap();

        let mut counters = Counters::default();
        counters.record(Access::PageFault);
        let bytes = out.finish(&counters.report()).unwrap();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "16916,20,0\nPage Fault Rate = 1.000\nTLB Hit Rate = 0.000\n"
        );
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = OutputWriter::create(dir.path().join("no/such/dir/output.txt"))
            .err()
            .unwrap();
        assert!(matches!(err, VmError::OutputUnwritable { .. }));
    }
}
