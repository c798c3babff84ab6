//! Pipeline configuration.
//!
//! The binary resolves these from command-line flags first, then the
//! environment variables named here, then defaults. An invalid value from
//! either source is a usage error.

use std::fmt;
use std::str::FromStr;

pub const STRICT_DATE_ENV: &str = "MKVERSION_STRICT_DATE";
pub const FORMAT_ENV: &str = "MKVERSION_FORMAT";

/// How the derived metadata is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `#define` lines.
    #[default]
    Header,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "header" | "c" | "h" => Ok(OutputFormat::Header),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format '{other}' (expected 'header' or 'json')"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Header => write!(f, "header"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Treat a manifest without a date record as an input error.
    pub strict_date: bool,
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_permissive_header() {
        let c = PipelineConfig::default();
        assert!(!c.strict_date);
        assert_eq!(c.format, OutputFormat::Header);
    }

    #[test]
    fn format_names_are_case_insensitive() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(" header ".parse::<OutputFormat>().unwrap(), OutputFormat::Header);
        assert_eq!("h".parse::<OutputFormat>().unwrap(), OutputFormat::Header);
    }

    #[test]
    fn format_parse_error_names_the_value() {
        let err = "yaml".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("yaml"));
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
