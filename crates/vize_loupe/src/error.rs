//! Error types for metadata resolution.
//!
//! Every variant is absorbed by [`crate::ResolutionService`]; callers of the
//! service only ever see (possibly empty) metadata.

use std::path::PathBuf;

use thiserror::Error;
use vize_atelier_sfc::SfcError;
use vize_croquis::ScriptParseError;

/// Errors raised while extracting metadata or loading configuration.
#[derive(Debug, Error)]
pub enum LoupeError {
    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The component source could not be split into regions.
    #[error("SFC error: {0}")]
    Sfc(#[from] SfcError),

    /// The script region is not valid JavaScript/TypeScript.
    #[error("script parse error: {0}")]
    Script(#[from] ScriptParseError),

    /// The script has no recognizable `export default { ... }`.
    #[error("no default-exported options object")]
    NoDefaultExport,

    /// Settings or a project configuration file could not be interpreted.
    #[error("invalid configuration in {origin}: {message}")]
    Config { origin: String, message: String },
}

impl LoupeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn config(origin: impl Into<String>, message: impl ToString) -> Self {
        Self::Config {
            origin: origin.into(),
            message: message.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type LoupeResult<T> = Result<T, LoupeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LoupeError::io(
            "/project/src/Foo.vue",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.to_string(), "failed to read /project/src/Foo.vue: not found");

        let err = LoupeError::config("jsconfig.json", "expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "invalid configuration in jsconfig.json: expected value at line 1 column 1"
        );

        assert_eq!(
            LoupeError::NoDefaultExport.to_string(),
            "no default-exported options object"
        );
    }
}
