//! SWC text file reader

use super::parser::{parse_line, SwcColumns, SwcLine};
use crate::data::{DataFormat, RawData, Row};
use crate::defect::{DefectCollection, DefectKind};
use crate::error::{MorphError, Result};
use crate::types::{PointType, Vector3};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Configuration for the SWC reader.
#[derive(Debug, Clone, Default)]
pub struct SwcReaderConfiguration {
    /// When `true`, malformed data lines are skipped and recorded as
    /// [`DefectKind::SkippedLine`] defects instead of aborting the read.
    ///
    /// Default: `false` (strict mode, errors propagate).
    pub failsafe: bool,
}

/// SWC text file reader
///
/// One point per line, `ID Type X Y Z Radius ParentID`. The ID offset of the
/// resulting table is the ID of the first data line.
pub struct SwcReader<R: BufRead> {
    reader: R,
    line_number: usize,
    config: SwcReaderConfiguration,
}

impl SwcReader<BufReader<File>> {
    /// Create a new SWC reader from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<'a> SwcReader<&'a [u8]> {
    /// Create a new SWC reader over in-memory text
    pub fn from_text(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl<R: Read> SwcReader<BufReader<R>> {
    /// Create a new SWC reader from any unbuffered reader
    pub fn from_reader(reader: R) -> Self {
        Self::new(BufReader::new(reader))
    }
}

impl<R: BufRead> SwcReader<R> {
    /// Create a new SWC reader from a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            config: SwcReaderConfiguration::default(),
        }
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: SwcReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Read the whole source into a table
    pub fn read(self) -> Result<RawData> {
        self.read_with_defects().map(|(data, _)| data)
    }

    /// Read the whole source, also returning lines skipped in failsafe mode
    pub fn read_with_defects(mut self) -> Result<(RawData, DefectCollection)> {
        let mut rows = Vec::new();
        let mut defects = DefectCollection::new();

        while let Some(line) = self.read_line()? {
            match parse_line(&line) {
                Ok(SwcLine::Skip) => {}
                Ok(SwcLine::Data(cols)) => rows.push(Self::to_row(&cols)),
                Err(message) if self.config.failsafe => {
                    defects.report(
                        DefectKind::SkippedLine,
                        vec![self.line_number as i64],
                        format!("line {}: {}", self.line_number, message),
                    );
                }
                Err(message) => {
                    return Err(MorphError::Parse {
                        line: self.line_number,
                        message,
                    })
                }
            }
        }

        let id_offset = match rows.first() {
            Some(row) => row.id,
            None => return Err(MorphError::Format("SWC source has no data rows".into())),
        };

        log::debug!(
            "read {} SWC rows over {} lines (first ID {})",
            rows.len(),
            self.line_number,
            id_offset
        );

        Ok((RawData::new(rows, id_offset, DataFormat::Swc), defects))
    }

    /// Read a single line, decoding non-UTF8 bytes as Windows-1252.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let line = match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => {
                let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(e.as_bytes());
                decoded.into_owned()
            }
        };
        Ok(Some(line))
    }

    fn to_row(cols: &SwcColumns) -> Row {
        Row::new(
            Vector3::new(cols.x, cols.y, cols.z),
            cols.radius,
            PointType::from_value(cols.point_type),
            cols.id,
            cols.parent_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = "\
# simple cell
1 1 0 0 0 1.0 -1

2 3 0 1 0 0.5 1
3 3 0 2 0 0.5 2
";

    #[test]
    fn test_read_simple() {
        let data = SwcReader::from_text(SIMPLE).read().unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data.id_offset(), 1);
        assert_eq!(data.format(), DataFormat::Swc);

        let row = data.get(2).unwrap();
        assert_eq!(row.point_type, PointType::BasalDendrite);
        assert_eq!(row.position(), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(row.radius, 0.5);
        assert_eq!(row.parent_id, 1);
    }

    #[test]
    fn test_strict_mode_reports_line() {
        let text = "1 1 0 0 0 1 -1\n2 3 0 1\n";
        let err = SwcReader::from_text(text).read().unwrap_err();
        match err {
            MorphError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_failsafe_skips_line() {
        let text = "1 1 0 0 0 1 -1\nbroken\n2 3 0 1 0 0.5 1\n";
        let (data, defects) = SwcReader::from_text(text)
            .with_configuration(SwcReaderConfiguration { failsafe: true })
            .read_with_defects()
            .unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(defects.len(), 1);
        assert_eq!(defects.of_kind(DefectKind::SkippedLine)[0].ids, vec![2]);
    }

    #[test]
    fn test_empty_source() {
        let err = SwcReader::from_text("# header only\n\n").read().unwrap_err();
        assert!(matches!(err, MorphError::Format(_)));
    }

    #[test]
    fn test_latin1_header() {
        let mut bytes = b"# scale 1 \xb5m\n".to_vec();
        bytes.extend_from_slice(b"1 1 0 0 0 1 -1\n");
        let data = SwcReader::from_reader(bytes.as_slice()).read().unwrap();
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_fractional_parent_is_parse_error() {
        let text = "1 1 0 0 0 1 -1\n2 3 0 1 0 0.5 1.5\n";
        match SwcReader::from_text(text).read() {
            Err(MorphError::Parse { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("ParentID"));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
