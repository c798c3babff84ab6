//! Bounded line records.
//!
//! Input is read in records of at most [`MAX_RECORD_LEN`] bytes. A record
//! ends after a `\n` or when the limit is reached, so an overlong physical
//! line arrives as several records. Field offsets elsewhere in the crate are
//! byte offsets into a [`RawLine`]. Values stay as bytes all the way to the
//! header; only JSON output and log fields see them as (lossy) text.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{MkversionError, Result};

/// Longest record handed out by [`read_record`].
pub const MAX_RECORD_LEN: usize = 998;

/// One input line with its terminator removed.
///
/// Anything from the first NUL byte on is dropped, then the line ends at the
/// first `\r` or `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawLine(Vec<u8>);

impl RawLine {
    pub fn from_record(record: &[u8]) -> Self {
        let end = record
            .iter()
            .position(|&b| b == 0 || b == b'\r' || b == b'\n')
            .unwrap_or(record.len());
        RawLine(record[..end].to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Up to `width` bytes starting at `offset`, clamped to the line.
    pub fn field(&self, offset: usize, width: usize) -> &[u8] {
        let start = offset.min(self.0.len());
        let end = offset.saturating_add(width).min(self.0.len());
        &self.0[start..end]
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.clone()
    }
}

impl From<&str> for RawLine {
    fn from(s: &str) -> Self {
        RawLine::from_record(s.as_bytes())
    }
}

/// Text view of `bytes` for logs and JSON. Invalid UTF-8 becomes U+FFFD.
pub fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// `serialize_with` helper writing a byte field as a JSON string.
pub(crate) fn serialize_lossy<S>(
    bytes: &[u8],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&lossy(bytes))
}

/// Read the next record into `buf`. Returns `false` at end of input.
pub fn read_record<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<bool> {
    buf.clear();
    while buf.len() < MAX_RECORD_LEN {
        let available = match reader.fill_buf() {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            break;
        }

        let room = MAX_RECORD_LEN - buf.len();
        let window = &available[..available.len().min(room)];
        match window.iter().position(|&b| b == b'\n') {
            Some(i) => {
                buf.extend_from_slice(&window[..=i]);
                reader.consume(i + 1);
                return Ok(true);
            }
            None => {
                let taken = window.len();
                buf.extend_from_slice(window);
                reader.consume(taken);
            }
        }
    }
    Ok(!buf.is_empty())
}

/// Iterator over the [`RawLine`] records of a reader.
pub struct Records<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> Records<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(MAX_RECORD_LEN),
        }
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = io::Result<RawLine>;

    fn next(&mut self) -> Option<Self::Item> {
        match read_record(&mut self.reader, &mut self.buf) {
            Ok(true) => Some(Ok(RawLine::from_record(&self.buf))),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Open `path` for buffered reading, mapping failure to [`MkversionError::Open`].
pub fn open_for_reading(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| MkversionError::open(path, e))
}

/// First record of `reader`, or `None` when the input is empty.
pub fn first_line<R: BufRead>(mut reader: R) -> io::Result<Option<RawLine>> {
    let mut buf = Vec::with_capacity(MAX_RECORD_LEN);
    if read_record(&mut reader, &mut buf)? {
        Ok(Some(RawLine::from_record(&buf)))
    } else {
        Ok(None)
    }
}

/// First line of the file at `path`. An empty or unreadable file is
/// reported as malformed `what`.
pub fn read_first_line(path: &Path, what: &'static str) -> Result<RawLine> {
    let reader = open_for_reading(path)?;
    match first_line(reader) {
        Ok(Some(line)) => Ok(line),
        Ok(None) | Err(_) => Err(MkversionError::malformed(what, path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn records(input: &[u8]) -> Vec<Vec<u8>> {
        Records::new(Cursor::new(input.to_vec()))
            .map(|r| r.unwrap().as_bytes().to_vec())
            .collect()
    }

    #[test]
    fn strips_lf_and_crlf() {
        assert_eq!(
            records(b"abc\r\ndef\nghi"),
            vec![b"abc".to_vec(), b"def".to_vec(), b"ghi".to_vec()]
        );
    }

    #[test]
    fn invalid_utf8_bytes_are_kept() {
        let line = RawLine::from_record(b"ab\xffcd\n");
        assert_eq!(line.as_bytes(), b"ab\xffcd");
        assert_eq!(lossy(line.as_bytes()), "ab\u{fffd}cd");
    }

    #[test]
    fn truncates_at_nul() {
        let line = RawLine::from_record(b"abc\0def\n");
        assert_eq!(line.as_bytes(), b"abc");
    }

    #[test]
    fn ends_at_embedded_carriage_return() {
        let line = RawLine::from_record(b"1.2.3\rtrailing\n");
        assert_eq!(line.as_bytes(), b"1.2.3");
    }

    #[test]
    fn overlong_line_is_split_into_bounded_records() {
        let mut input = vec![b'x'; MAX_RECORD_LEN + 5];
        input.push(b'\n');
        let recs = records(&input);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].len(), MAX_RECORD_LEN);
        assert_eq!(recs[1].len(), 5);
    }

    #[test]
    fn field_is_clamped_to_line() {
        let line = RawLine::from("D 2024");
        assert_eq!(line.field(2, 10), b"2024");
        assert_eq!(line.field(13, 8), b"");
        assert_eq!(line.field(usize::MAX, 8), b"");
    }

    #[test]
    fn first_line_of_empty_input_is_none() {
        assert!(first_line(Cursor::new(Vec::new())).unwrap().is_none());
    }

    #[test]
    fn blank_first_line_is_some_and_empty() {
        let line = first_line(Cursor::new(b"\nmore\n".to_vec())).unwrap().unwrap();
        assert!(line.is_empty());
    }

    #[test]
    fn read_first_line_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        let err = read_first_line(&missing, "VERSION").unwrap_err();
        assert!(matches!(err, MkversionError::Open { .. }));
    }

    #[test]
    fn read_first_line_reports_empty_file_as_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("VERSION");
        std::fs::write(&empty, b"").unwrap();
        let err = read_first_line(&empty, "VERSION").unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("malformed VERSION file: {}", empty.display())
        );
    }
}
