//! Release version from the `VERSION` file.

use std::io::BufRead;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{MkversionError, Result};
use crate::line::{self, RawLine};

/// Number of fields in a resource version tuple.
pub const RESOURCE_FIELDS: usize = 4;

/// A release version string and the forms derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseVersion {
    /// The version line, verbatim.
    #[serde(serialize_with = "line::serialize_lossy")]
    pub raw: Vec<u8>,
    /// Major, minor and patch. Missing components are 0.
    pub components: [u32; 3],
    /// `major * 10000 + minor * 100 + patch`
    pub number: u64,
    /// Four comma-separated fields, e.g. `2,1,0,0`.
    #[serde(serialize_with = "line::serialize_lossy")]
    pub resource: Vec<u8>,
}

impl ReleaseVersion {
    pub fn from_line(line: &RawLine) -> Self {
        let components = parse_components(line.as_bytes());
        Self {
            raw: line.to_vec(),
            components,
            number: packed_number(components),
            resource: resource_version(line.as_bytes()),
        }
    }
}

/// Split `version` into its first three numeric runs.
///
/// Digits accumulate into the current component; every non-digit byte (and
/// the end of input) closes it, so `1..2` is `[1, 0, 2]` and `v1.2` is
/// `[0, 1, 2]`. Runs past the third are consumed and dropped.
pub fn parse_components(version: &[u8]) -> [u32; 3] {
    let mut components = [0u32; 3];
    let mut captured = 0;
    let mut acc: u32 = 0;

    for &b in version.iter().chain(std::iter::once(&0u8)) {
        if b.is_ascii_digit() {
            acc = acc.saturating_mul(10).saturating_add(u32::from(b - b'0'));
        } else {
            if captured < components.len() {
                components[captured] = acc;
                captured += 1;
            }
            acc = 0;
        }
    }
    components
}

pub fn packed_number([major, minor, patch]: [u32; 3]) -> u64 {
    u64::from(major) * 10_000 + u64::from(minor) * 100 + u64::from(patch)
}

/// Rewrite `version` as a four-field, comma-separated tuple.
///
/// The first three `.` become `,`. The string ends at the first `-` or at a
/// fourth `.`. Missing fields are filled with `,0`. Other bytes pass through
/// untouched.
pub fn resource_version(version: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(version.len() + 2 * (RESOURCE_FIELDS - 1));
    let mut separators = 0;

    for &b in version {
        match b {
            b'-' => break,
            b'.' if separators < RESOURCE_FIELDS - 1 => {
                out.push(b',');
                separators += 1;
            }
            b'.' => break,
            _ => out.push(b),
        }
    }
    while separators < RESOURCE_FIELDS - 1 {
        out.extend_from_slice(b",0");
        separators += 1;
    }
    out
}

/// Parse the first line of `reader`. `Ok(None)` when the input is empty.
pub fn parse_release<R: BufRead>(reader: R) -> std::io::Result<Option<ReleaseVersion>> {
    Ok(line::first_line(reader)?.map(|l| ReleaseVersion::from_line(&l)))
}

/// Read the release version file at `path`.
pub fn read_release(path: &Path) -> Result<ReleaseVersion> {
    let reader = line::open_for_reading(path)?;
    let version = parse_release(reader)
        .ok()
        .flatten()
        .ok_or_else(|| MkversionError::malformed("VERSION", path))?;
    debug!(
        file = %path.display(),
        version = %line::lossy(&version.raw),
        number = version.number,
        "read release version"
    );
    Ok(version)
}
