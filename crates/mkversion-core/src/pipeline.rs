//! The full run: read all three inputs, then write the result.

use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, info_span};

use crate::config::{OutputFormat, PipelineConfig};
use crate::error::{MkversionError, Result};
use crate::header::{self, BuildMetadata};
use crate::identity::read_identity;
use crate::line;
use crate::manifest::read_manifest;
use crate::release::read_release;

/// Paths of the three input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    /// `manifest.uuid`: the check-in identifier.
    pub identity: PathBuf,
    /// `manifest`: the check-in description.
    pub manifest: PathBuf,
    /// `VERSION`: the release version.
    pub release: PathBuf,
}

impl InputPaths {
    /// Build from positional arguments. Exactly three are required.
    pub fn from_args<I, P>(program: &str, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut args: Vec<PathBuf> = args.into_iter().map(Into::into).collect();
        if args.len() != 3 {
            return Err(MkversionError::Usage {
                program: program.to_string(),
            });
        }
        let release = args.remove(2);
        let manifest = args.remove(1);
        let identity = args.remove(0);
        Ok(Self {
            identity,
            manifest,
            release,
        })
    }
}

/// Read and derive everything. Nothing is written.
pub fn collect(inputs: &InputPaths, config: &PipelineConfig) -> Result<BuildMetadata> {
    let identity = read_identity(&inputs.identity)?;
    let date = read_manifest(&inputs.manifest, config.strict_date)?;
    let release = read_release(&inputs.release)?;
    Ok(BuildMetadata {
        identity,
        date,
        release,
    })
}

/// Collect all inputs, then write them to `out` in the configured format.
///
/// Any input error is returned before the first byte is written.
pub fn generate<W: Write>(
    inputs: &InputPaths,
    config: &PipelineConfig,
    compiler: &str,
    out: &mut W,
) -> Result<BuildMetadata> {
    let _span = info_span!("mkversion.generate", format = %config.format).entered();

    let metadata = collect(inputs, config)?;
    match config.format {
        OutputFormat::Header => header::write_header(out, &metadata, compiler)?,
        OutputFormat::Json => header::write_json(out, &metadata, compiler)?,
    }
    debug!(
        date = metadata.date.is_some(),
        version = %line::lossy(&metadata.release.raw),
        "header written"
    );
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_args_keeps_positional_order() {
        let paths = InputPaths::from_args("mkversion", ["a", "b", "c"]).unwrap();
        assert_eq!(paths.identity, PathBuf::from("a"));
        assert_eq!(paths.manifest, PathBuf::from("b"));
        assert_eq!(paths.release, PathBuf::from("c"));
    }

    #[test]
    fn from_args_rejects_other_counts() {
        for n in [0usize, 1, 2, 4, 5] {
            let args = vec!["x"; n];
            let err = InputPaths::from_args("mkversion", args).unwrap_err();
            assert!(matches!(err, MkversionError::Usage { .. }), "count {n}");
        }
    }
}
