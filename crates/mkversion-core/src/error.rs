//! Error taxonomy for metadata extraction and header emission.

use std::path::{Path, PathBuf};

/// Errors that abort header generation.
///
/// Every variant is fatal: the caller is expected to report the message and
/// exit with status 1 without writing any constants.
#[derive(Debug, thiserror::Error)]
pub enum MkversionError {
    #[error("Usage: {program} manifest.uuid manifest VERSION")]
    Usage { program: String },

    #[error("cannot open \"{}\" for reading", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {what} file: {}", path.display())]
    Malformed { what: &'static str, path: PathBuf },

    #[error("no date record (\"D \" line) in manifest file: {}", path.display())]
    MissingDateRecord { path: PathBuf },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MkversionError {
    pub(crate) fn open(path: &Path, source: std::io::Error) -> Self {
        MkversionError::Open {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(what: &'static str, path: &Path) -> Self {
        MkversionError::Malformed {
            what,
            path: path.to_path_buf(),
        }
    }

    /// The input file this error is about, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            MkversionError::Open { path, .. }
            | MkversionError::Malformed { path, .. }
            | MkversionError::MissingDateRecord { path } => Some(path),
            _ => None,
        }
    }
}

/// Result type for mkversion operations.
pub type Result<T> = std::result::Result<T, MkversionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_error_names_file_in_quotes() {
        let err = MkversionError::open(
            Path::new("manifest.uuid"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "cannot open \"manifest.uuid\" for reading");
        assert_eq!(err.path(), Some(Path::new("manifest.uuid")));
    }

    #[test]
    fn malformed_error_names_kind_and_file() {
        let err = MkversionError::malformed("VERSION", Path::new("/src/VERSION"));
        assert_eq!(err.to_string(), "malformed VERSION file: /src/VERSION");
    }

    #[test]
    fn usage_error_lists_arguments() {
        let err = MkversionError::Usage {
            program: "mkversion".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Usage: mkversion manifest.uuid manifest VERSION"
        );
        assert!(err.path().is_none());
    }
}
