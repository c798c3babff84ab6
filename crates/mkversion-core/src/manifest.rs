//! Check-in date from the `manifest` file.
//!
//! The manifest is scanned for a `D ` card laid out as
//! `D YYYY-MM-DDTHH:MM:SS...`. Fields are taken at fixed byte offsets; this
//! is a positional contract with the tool that writes the manifest.

use std::io::BufRead;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{MkversionError, Result};
use crate::line::{self, RawLine, Records};

pub const DATE_MARKER: &[u8] = b"D ";
pub const DATE_OFFSET: usize = 2;
pub const DATE_WIDTH: usize = 10;
pub const TIME_OFFSET: usize = 13;
pub const TIME_WIDTH: usize = 8;
pub const YEAR_WIDTH: usize = 4;

/// Date and time of a check-in in display and numeric forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRecord {
    /// `YYYY-MM-DD`
    #[serde(serialize_with = "line::serialize_lossy")]
    pub date: Vec<u8>,
    /// `HH:MM:SS`
    #[serde(serialize_with = "line::serialize_lossy")]
    pub time: Vec<u8>,
    #[serde(serialize_with = "line::serialize_lossy")]
    pub year: Vec<u8>,
    /// Digits of `date`.
    pub numeric_date: String,
    /// Digits of `time` with leading zeros removed. Empty for midnight.
    pub numeric_time: String,
}

impl DateRecord {
    /// Decompose a `D ` line. Returns `None` for any other line.
    pub fn from_line(line: &RawLine) -> Option<Self> {
        if !line.as_bytes().starts_with(DATE_MARKER) {
            return None;
        }

        let date = line.field(DATE_OFFSET, DATE_WIDTH);
        let time = line.field(TIME_OFFSET, TIME_WIDTH);
        let numeric_time = digits(time);

        Some(Self {
            date: date.to_vec(),
            time: time.to_vec(),
            year: date[..date.len().min(YEAR_WIDTH)].to_vec(),
            numeric_date: digits(date),
            numeric_time: numeric_time.trim_start_matches('0').to_string(),
        })
    }

    /// `date` and `time` joined by a space.
    pub fn display(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.date.len() + 1 + self.time.len());
        out.extend_from_slice(&self.date);
        out.push(b' ');
        out.extend_from_slice(&self.time);
        out
    }
}

fn digits(field: &[u8]) -> String {
    field
        .iter()
        .filter(|b| b.is_ascii_digit())
        .map(|&b| char::from(b))
        .collect()
}

/// Scan every line of `reader` and decompose the first `D ` line.
///
/// Later `D ` lines are read and ignored. `Ok(None)` means no line carried
/// the marker.
pub fn scan_manifest<R: BufRead>(reader: R) -> std::io::Result<Option<DateRecord>> {
    let mut found = None;
    for record in Records::new(reader) {
        let record = record?;
        if found.is_none() {
            found = DateRecord::from_line(&record);
        }
    }
    Ok(found)
}

/// Read the manifest at `path`.
///
/// A manifest without a date record yields `Ok(None)`, unless `strict` is
/// set, in which case it is an error.
pub fn read_manifest(path: &Path, strict: bool) -> Result<Option<DateRecord>> {
    let reader = line::open_for_reading(path)?;
    let record =
        scan_manifest(reader).map_err(|_| MkversionError::malformed("manifest", path))?;

    match &record {
        Some(r) => debug!(
            file = %path.display(),
            date = %line::lossy(&r.display()),
            "read check-in date"
        ),
        None if strict => {
            return Err(MkversionError::MissingDateRecord {
                path: path.to_path_buf(),
            })
        }
        None => warn!(file = %path.display(), "manifest has no date record; omitting date constants"),
    }
    Ok(record)
}
