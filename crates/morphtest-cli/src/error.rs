//! Error types for morphtest-cli

use morphtest::MorphError;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Library error
    #[error(transparent)]
    Morph(#[from] MorphError),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Numeric exit status for this error
    pub(crate) fn code(&self) -> u8 {
        match self {
            Self::FileNotFound(_) => 3,
            Self::Morph(e) => match e {
                MorphError::Catalog { .. } | MorphError::UnknownToken { .. } | MorphError::Yaml(_) => 4,
                MorphError::InvalidParameter { .. } => 5,
                MorphError::UnknownFramework(_) => 6,
                MorphError::Io { .. } => 7,
                MorphError::Template(_) | MorphError::Dataset(_) => 1,
            },
            Self::Json(_) => 1,
        }
    }

    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// Fail with [`CliError::FileNotFound`] unless `path` is an existing file.
pub(crate) fn require_file(path: &std::path::Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::FileNotFound(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::FileNotFound(PathBuf::from("x")).code(), 3);
        assert_eq!(CliError::from(MorphError::catalog(1, "bad")).code(), 4);
        assert_eq!(
            CliError::from(MorphError::invalid_parameter("iterations", 0, ">= 1")).code(),
            5
        );
        assert_eq!(CliError::from(MorphError::UnknownFramework("x".into())).code(), 6);
    }

    #[test]
    fn test_message_is_transparent() {
        let err = CliError::from(MorphError::UnknownFramework("x".into()));
        assert_eq!(
            err.to_string(),
            "No test case generator registered for framework 'x'"
        );
    }
}
