//! Identity of the toolchain that built this crate.

/// Placeholder used when the toolchain could not be identified.
pub const UNKNOWN_COMPILER: &str = "unknown";

/// `rustc-<release>` as recorded by the build script, or `"unknown"`.
pub fn compiler_identity() -> &'static str {
    match option_env!("MKVERSION_COMPILER") {
        Some(id) if !id.is_empty() => id,
        _ => UNKNOWN_COMPILER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_names_rustc_or_is_unknown() {
        let id = compiler_identity();
        assert!(
            id == UNKNOWN_COMPILER || id.starts_with("rustc-"),
            "unexpected compiler identity: {id}"
        );
    }

    #[test]
    fn identity_is_a_single_token() {
        assert!(!compiler_identity().contains(char::is_whitespace));
        assert!(!compiler_identity().contains('"'));
    }
}
