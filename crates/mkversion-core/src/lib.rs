//! mkversion core library
//!
//! Turns check-in metadata (`manifest.uuid`, `manifest`) and the release
//! `VERSION` file into a C header of build constants:
//!
//! ```text
//! #define MANIFEST_UUID "4f2a9c1be0d3e5f60718293a4b5c6d7e8f901234"
//! #define MANIFEST_VERSION "[4f2a9c1be0]"
//! #define MANIFEST_DATE "2024-03-07 09:05:33"
//! #define MANIFEST_YEAR "2024"
//! #define MANIFEST_NUMERIC_DATE 20240307
//! #define MANIFEST_NUMERIC_TIME 90533
//! #define RELEASE_VERSION "2.1.0"
//! #define RELEASE_VERSION_NUMBER 20100
//! #define RELEASE_RESOURCE_VERSION 2,1,0,0
//! #define COMPILER "rustc-1.80.0"
//! ```

pub mod compiler;
pub mod config;
pub mod error;
pub mod header;
pub mod identity;
pub mod line;
pub mod manifest;
pub mod pipeline;
pub mod release;
pub mod telemetry;

pub use compiler::{compiler_identity, UNKNOWN_COMPILER};
pub use config::{OutputFormat, PipelineConfig};
pub use error::{MkversionError, Result};
pub use header::{render_header, write_header, write_json, BuildMetadata, Define};
pub use identity::{read_identity, Identity};
pub use line::RawLine;
pub use manifest::{read_manifest, scan_manifest, DateRecord};
pub use pipeline::{collect, generate, InputPaths};
pub use release::{read_release, ReleaseVersion};
pub use telemetry::init_tracing;
