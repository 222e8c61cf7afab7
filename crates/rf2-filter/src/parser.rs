//! Line and field parsing for RF2 files.
//!
//! RF2 files are tab-delimited UTF-8 text. Quote characters carry no meaning:
//! real releases contain stray, unbalanced `"` characters, so every parser
//! here splits on the delimiter alone.

use std::io::{BufRead, Read};

use csv::{ByteRecord, Reader, ReaderBuilder};
use rf2_types::well_known::{
    DESTINATION_ID_COLUMN, DESTINATION_ID_INDEX, SOURCE_ID_COLUMN, SOURCE_ID_INDEX,
};

use crate::types::{FilterError, FilterResult};

/// RF2 field delimiter.
pub const DELIMITER: char = '\t';

/// Line separator written to filtered output, whatever the input used.
pub const LINE_SEPARATOR: &[u8] = b"\r\n";

const UTF8_BOM: char = '\u{feff}';

/// Splits a line into tab-delimited fields. Quotes are ordinary characters.
///
/// # Examples
///
/// ```
/// use rf2_filter::parser::split_fields;
///
/// let fields: Vec<&str> = split_fields("id\t\"term\tmoduleId").collect();
/// assert_eq!(fields, vec!["id", "\"term", "moduleId"]);
/// ```
pub fn split_fields(line: &str) -> std::str::Split<'_, char> {
    line.split(DELIMITER)
}

/// Reads a file one line at a time without holding more than one line.
///
/// - Lines end at `\n`, `\r\n` or a lone `\r`.
/// - A UTF-8 byte-order mark at the very start of the input is removed.
/// - Invalid UTF-8 is replaced with U+FFFD rather than failing the file.
pub struct LineReader<R: BufRead> {
    reader: R,
    bytes: Vec<u8>,
    line: String,
    first: bool,
}

impl<R: BufRead> LineReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            bytes: Vec::new(),
            line: String::new(),
            first: true,
        }
    }

    /// Returns the next line without its terminator, or `None` at end of input.
    pub fn next_line(&mut self) -> FilterResult<Option<&str>> {
        self.bytes.clear();
        if !self.read_raw_line()? {
            return Ok(None);
        }

        self.line.clear();
        match std::str::from_utf8(&self.bytes) {
            Ok(text) => self.line.push_str(text),
            Err(_) => self.line.push_str(&String::from_utf8_lossy(&self.bytes)),
        }

        let line = self.line.as_str();
        if std::mem::take(&mut self.first) {
            return Ok(Some(line.strip_prefix(UTF8_BOM).unwrap_or(line)));
        }
        Ok(Some(line))
    }

    /// Moves the next line's bytes, minus its terminator, into `self.bytes`.
    ///
    /// Returns false at end of input.
    fn read_raw_line(&mut self) -> FilterResult<bool> {
        let mut read_any = false;
        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                return Ok(read_any);
            }
            read_any = true;

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    let terminator = available[end];
                    self.bytes.extend_from_slice(&available[..end]);
                    self.reader.consume(end + 1);
                    if terminator == b'\r' && self.reader.fill_buf()?.first() == Some(&b'\n') {
                        self.reader.consume(1);
                    }
                    return Ok(true);
                }
                None => {
                    let len = available.len();
                    self.bytes.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }
    }
}

/// Builds a streaming reader for a relationship file.
///
/// Quoting is disabled and records may have any length; the header is read
/// as an ordinary record so an empty file can be reported.
pub fn relationship_reader<R: Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(reader)
}

/// Validates the `sourceId`/`destinationId` columns of a relationship header.
pub fn validate_relationship_header(header: &ByteRecord, file: &str) -> FilterResult<()> {
    let expected = [
        (SOURCE_ID_INDEX, SOURCE_ID_COLUMN),
        (DESTINATION_ID_INDEX, DESTINATION_ID_COLUMN),
    ];

    for (position, expected_col) in expected {
        let found = header.get(position).unwrap_or(b"");
        if found != expected_col.as_bytes() {
            return Err(FilterError::UnexpectedColumn {
                file: file.to_string(),
                position,
                expected: expected_col.to_string(),
                found: String::from_utf8_lossy(found).into_owned(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_lines(input: &[u8]) -> Vec<String> {
        let mut reader = LineReader::new(input);
        let mut lines = Vec::new();
        while let Some(line) = reader.next_line().unwrap() {
            lines.push(line.to_string());
        }
        lines
    }

    fn make_record(fields: &[&str]) -> ByteRecord {
        let mut record = ByteRecord::new();
        for field in fields {
            record.push_field(field.as_bytes());
        }
        record
    }

    #[test]
    fn test_split_fields_ignores_quotes() {
        let fields: Vec<&str> = split_fields("1\t\"unbalanced\t\"\"\t").collect();
        assert_eq!(fields, vec!["1", "\"unbalanced", "\"\"", ""]);
    }

    #[test]
    fn test_line_endings() {
        assert_eq!(collect_lines(b"a\r\nb\nc"), vec!["a", "b", "c"]);
        assert_eq!(collect_lines(b"a\r\n\r\nb\r\n"), vec!["a", "", "b"]);
        assert_eq!(collect_lines(b"trailing\r"), vec!["trailing"]);
        assert!(collect_lines(b"").is_empty());
    }

    #[test]
    fn test_bom_stripped_from_first_line_only() {
        let input = "\u{feff}id\tmoduleId\n\u{feff}x\ty\n";
        let lines = collect_lines(input.as_bytes());
        assert_eq!(lines, vec!["id\tmoduleId", "\u{feff}x\ty"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let lines = collect_lines(b"ok\n\xff\xfe bad\n");
        assert_eq!(lines[0], "ok");
        assert_eq!(lines[1], "\u{fffd}\u{fffd} bad");
    }

    #[test]
    fn test_lone_carriage_return_ends_line() {
        assert_eq!(collect_lines(b"a\rb\rc\r"), vec!["a", "b", "c"]);
        assert_eq!(collect_lines(b"a\r\rb\n\rc"), vec!["a", "", "b", "", "c"]);
    }

    #[test]
    fn test_terminator_split_across_buffers() {
        // A one-byte buffer puts "\r" and "\n" in separate fills.
        let reader = std::io::BufReader::with_capacity(1, &b"ab\r\ncd\r\n"[..]);
        let mut lines = LineReader::new(reader);
        assert_eq!(lines.next_line().unwrap(), Some("ab"));
        assert_eq!(lines.next_line().unwrap(), Some("cd"));
        assert_eq!(lines.next_line().unwrap(), None);
    }

    #[test]
    fn test_relationship_reader_keeps_quotes() {
        let data = "id\teffectiveTime\tactive\tmoduleId\tsourceId\tdestinationId\n\"R1\t20150301\t1\t\"\t900000000000207008\t731000124108\n";
        let mut reader = relationship_reader(data.as_bytes());
        let mut record = ByteRecord::new();

        assert!(reader.read_byte_record(&mut record).unwrap());
        validate_relationship_header(&record, "rel.txt").unwrap();

        assert!(reader.read_byte_record(&mut record).unwrap());
        assert_eq!(record.get(0), Some(&b"\"R1"[..]));
        assert_eq!(record.get(3), Some(&b"\""[..]));
        assert_eq!(record.get(4), Some(&b"900000000000207008"[..]));
    }

    #[test]
    fn test_validate_relationship_header_rejects_layout() {
        let header = make_record(&["id", "effectiveTime", "active", "moduleId", "destinationId", "sourceId"]);
        let err = validate_relationship_header(&header, "rel.txt").unwrap_err();
        match err {
            FilterError::UnexpectedColumn {
                position, found, ..
            } => {
                assert_eq!(position, 4);
                assert_eq!(found, "destinationId");
            }
            other => panic!("unexpected error: {other}"),
        }

        let short = make_record(&["id", "effectiveTime"]);
        let err = validate_relationship_header(&short, "rel.txt").unwrap_err();
        assert!(err.is_format_error());
    }
}
