//! Rendering of derived metadata as `#define` lines or JSON.
//!
//! The constant names and their order are a contract with the code that
//! includes the generated header.

use std::io::Write;

use serde::Serialize;

use crate::identity::Identity;
use crate::line;
use crate::manifest::DateRecord;
use crate::release::ReleaseVersion;

pub const MANIFEST_UUID: &str = "MANIFEST_UUID";
pub const MANIFEST_VERSION: &str = "MANIFEST_VERSION";
pub const MANIFEST_DATE: &str = "MANIFEST_DATE";
pub const MANIFEST_YEAR: &str = "MANIFEST_YEAR";
pub const MANIFEST_NUMERIC_DATE: &str = "MANIFEST_NUMERIC_DATE";
pub const MANIFEST_NUMERIC_TIME: &str = "MANIFEST_NUMERIC_TIME";
pub const RELEASE_VERSION: &str = "RELEASE_VERSION";
pub const RELEASE_VERSION_NUMBER: &str = "RELEASE_VERSION_NUMBER";
pub const RELEASE_RESOURCE_VERSION: &str = "RELEASE_RESOURCE_VERSION";
pub const COMPILER: &str = "COMPILER";

/// Everything extracted from the three input files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildMetadata {
    pub identity: Identity,
    /// `None` when the manifest had no date record.
    pub date: Option<DateRecord>,
    pub release: ReleaseVersion,
}

/// A single header constant. Values are raw bytes from the inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Define {
    /// Emitted in double quotes.
    Str(&'static str, Vec<u8>),
    /// Emitted bare.
    Raw(&'static str, Vec<u8>),
}

impl Define {
    pub fn name(&self) -> &'static str {
        match self {
            Define::Str(name, _) | Define::Raw(name, _) => *name,
        }
    }

    pub fn value(&self) -> &[u8] {
        match self {
            Define::Str(_, value) | Define::Raw(_, value) => value,
        }
    }

    /// Write `#define NAME value` and a newline, value bytes untouched.
    pub fn write_line<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        write!(out, "#define {} ", self.name())?;
        match self {
            Define::Str(_, value) => {
                out.write_all(b"\"")?;
                out.write_all(value)?;
                out.write_all(b"\"")?;
            }
            Define::Raw(_, value) => out.write_all(value)?,
        }
        out.write_all(b"\n")
    }
}

/// Lossy rendering for logs.
impl std::fmt::Display for Define {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = line::lossy(self.value());
        match self {
            Define::Str(name, _) => write!(f, "#define {name} \"{value}\""),
            Define::Raw(name, _) => write!(f, "#define {name} {value}"),
        }
    }
}

fn bracketed(display: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(display.len() + 2);
    out.push(b'[');
    out.extend_from_slice(display);
    out.push(b']');
    out
}

impl BuildMetadata {
    /// The header constants in emission order.
    pub fn defines(&self, compiler: &str) -> Vec<Define> {
        let mut defines = vec![
            Define::Str(MANIFEST_UUID, self.identity.full.clone()),
            Define::Str(MANIFEST_VERSION, bracketed(&self.identity.display)),
        ];

        if let Some(date) = &self.date {
            defines.extend([
                Define::Str(MANIFEST_DATE, date.display()),
                Define::Str(MANIFEST_YEAR, date.year.clone()),
                Define::Raw(MANIFEST_NUMERIC_DATE, date.numeric_date.clone().into_bytes()),
                Define::Raw(MANIFEST_NUMERIC_TIME, date.numeric_time.clone().into_bytes()),
            ]);
        }

        defines.extend([
            Define::Str(RELEASE_VERSION, self.release.raw.clone()),
            Define::Raw(
                RELEASE_VERSION_NUMBER,
                self.release.number.to_string().into_bytes(),
            ),
            Define::Raw(RELEASE_RESOURCE_VERSION, self.release.resource.clone()),
            Define::Str(COMPILER, compiler.as_bytes().to_vec()),
        ]);
        defines
    }
}

/// Write the header, one `#define` per line.
pub fn write_header<W: Write>(
    out: &mut W,
    metadata: &BuildMetadata,
    compiler: &str,
) -> std::io::Result<()> {
    for define in metadata.defines(compiler) {
        define.write_line(out)?;
    }
    out.flush()
}

/// The header bytes, exactly as [`write_header`] writes them.
pub fn render_header(metadata: &BuildMetadata, compiler: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for define in metadata.defines(compiler) {
        // Writing into a Vec cannot fail.
        let _ = define.write_line(&mut out);
    }
    out
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    #[serde(flatten)]
    metadata: &'a BuildMetadata,
    compiler: &'a str,
}

/// Write the metadata as a single pretty-printed JSON object.
pub fn write_json<W: Write>(
    out: &mut W,
    metadata: &BuildMetadata,
    compiler: &str,
) -> serde_json::Result<()> {
    let doc = JsonDocument { metadata, compiler };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out).map_err(serde_json::Error::io)
}
