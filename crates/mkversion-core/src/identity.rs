//! Check-in identity from the `manifest.uuid` file.

use std::io::BufRead;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{MkversionError, Result};
use crate::line::{self, RawLine};

/// Length in bytes of the short display form of an identifier.
pub const DISPLAY_LEN: usize = 10;

/// A check-in identifier and its short display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// The identifier token, verbatim.
    #[serde(serialize_with = "line::serialize_lossy")]
    pub full: Vec<u8>,
    /// The first [`DISPLAY_LEN`] bytes of `full`, unpadded.
    #[serde(serialize_with = "line::serialize_lossy")]
    pub display: Vec<u8>,
}

impl Identity {
    pub fn from_line(line: &RawLine) -> Self {
        Self {
            full: line.to_vec(),
            display: line.field(0, DISPLAY_LEN).to_vec(),
        }
    }
}

/// Extract the identity from the first line of `reader`.
///
/// Returns `Ok(None)` when the input is empty.
pub fn parse_identity<R: BufRead>(reader: R) -> std::io::Result<Option<Identity>> {
    Ok(line::first_line(reader)?.map(|l| Identity::from_line(&l)))
}

/// Read the identity file at `path`.
pub fn read_identity(path: &Path) -> Result<Identity> {
    let reader = line::open_for_reading(path)?;
    let identity = parse_identity(reader)
        .ok()
        .flatten()
        .ok_or_else(|| MkversionError::malformed("manifest.uuid", path))?;
    debug!(
        file = %path.display(),
        id = %line::lossy(&identity.display),
        "read check-in identity"
    );
    Ok(identity)
}
