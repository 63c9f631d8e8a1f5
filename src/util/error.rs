// BuildSleuth - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for a scan run. Every variant is fatal and maps to
/// exit status 1 in `main`.
#[derive(Debug)]
pub enum BuildSleuthError {
    /// The log file path does not exist.
    FileNotFound { path: PathBuf },

    /// The log file could not be decoded under either encoding.
    Decode(DecodeError),

    /// I/O error with path context (e.g. writing the report).
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for BuildSleuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound { path } => write!(f, "File {} not found.", path.display()),
            Self::Decode(e) => write!(f, "Failed to read file: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for BuildSleuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileNotFound { .. } => None,
            Self::Decode(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Decode errors
// ---------------------------------------------------------------------------

/// Both decode attempts failed.
///
/// Both decoders are lossy, so an attempt can only be rejected by a failed
/// read of the file.
#[derive(Debug)]
pub struct DecodeError {
    pub path: PathBuf,
    /// Read failure on the UTF-8 attempt.
    pub primary: io::Error,
    /// Read failure on the UTF-16LE attempt.
    pub fallback: io::Error,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}': UTF-16LE fallback failed: {} (UTF-8 attempt: {})",
            self.path.display(),
            self.fallback,
            self.primary
        )
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.fallback)
    }
}

impl From<DecodeError> for BuildSleuthError {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading. Never fatal: the loader turns
/// them into warnings and falls back to defaults.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for BuildSleuth results.
pub type Result<T> = std::result::Result<T, BuildSleuthError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_not_found_message_names_path() {
        let err = BuildSleuthError::FileNotFound {
            path: PathBuf::from("missing.log"),
        };
        assert_eq!(err.to_string(), "File missing.log not found.");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_decode_error_chains_fallback_source() {
        let err: BuildSleuthError = DecodeError {
            path: PathBuf::from("build.log"),
            primary: io::Error::other("first"),
            fallback: io::Error::other("second"),
        }
        .into();

        let msg = err.to_string();
        assert!(msg.starts_with("Failed to read file:"), "got: {msg}");
        assert!(msg.contains("second"));
        assert!(msg.contains("first"));

        let decode = err.source().expect("decode error is chained");
        assert_eq!(decode.source().map(|s| s.to_string()), Some("second".into()));
    }
}
