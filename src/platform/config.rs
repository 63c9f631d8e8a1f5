// BuildSleuth - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::ScanOptions;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for BuildSleuth configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/buildsleuth/ or %APPDATA%\BuildSleuth\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of `config.toml`.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[scan]` section.
    pub scan: ScanSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[scan]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ScanSection {
    /// Lines printed after each matching line.
    pub context_lines: Option<usize>,
    /// Characters printed from the end of the file when nothing matches.
    pub tail_chars: Option<usize>,
    /// Files above this size in bytes are memory-mapped.
    pub large_file_threshold_bytes: Option<u64>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Scan tunables.
    pub scan: ScanOptions,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

/// Load and validate `config.toml` at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// problems. A missing file yields defaults with no problems (first run).
/// An unreadable or unparseable file yields defaults plus one problem.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<ConfigError>) {
    let mut problems: Vec<ConfigError> = Vec::new();

    if !config_path.exists() {
        return (AppConfig::default(), problems);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            problems.push(ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), problems);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            problems.push(ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), problems);
        }
    };

    let mut config = AppConfig::default();

    // -- Scan: context_lines --
    if let Some(n) = raw.scan.context_lines {
        match validate_context_lines(n) {
            Ok(n) => config.scan.context_lines = n,
            Err(e) => problems.push(e),
        }
    }

    // -- Scan: tail_chars --
    if let Some(n) = raw.scan.tail_chars {
        match validate_tail_chars(n) {
            Ok(n) => config.scan.tail_chars = n,
            Err(e) => problems.push(e),
        }
    }

    // -- Scan: large_file_threshold_bytes --
    if let Some(bytes) = raw.scan.large_file_threshold_bytes {
        if bytes >= constants::MIN_LARGE_FILE_THRESHOLD {
            config.scan.large_file_threshold = bytes;
        } else {
            problems.push(ConfigError::ValueOutOfRange {
                field: "scan.large_file_threshold_bytes".to_string(),
                value: bytes.to_string(),
                expected: format!(
                    "at least {} (default {})",
                    constants::MIN_LARGE_FILE_THRESHOLD,
                    constants::DEFAULT_LARGE_FILE_THRESHOLD
                ),
            });
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            problems.push(ConfigError::ValueOutOfRange {
                field: "logging.level".to_string(),
                value: level.clone(),
                expected: "one of error, warn, info, debug, trace".to_string(),
            });
        }
    }

    (config, problems)
}

/// Check a context line count against its named bounds.
pub fn validate_context_lines(n: usize) -> Result<usize, ConfigError> {
    check_range(
        "scan.context_lines",
        n,
        constants::MIN_CONTEXT_LINES,
        constants::MAX_CONTEXT_LINES,
        constants::DEFAULT_CONTEXT_LINES,
    )
}

/// Check a tail size against its named bounds.
pub fn validate_tail_chars(n: usize) -> Result<usize, ConfigError> {
    check_range(
        "scan.tail_chars",
        n,
        constants::MIN_TAIL_CHARS,
        constants::MAX_TAIL_CHARS,
        constants::DEFAULT_TAIL_CHARS,
    )
}

fn check_range(
    field: &str,
    n: usize,
    min: usize,
    max: usize,
    default: usize,
) -> Result<usize, ConfigError> {
    if (min..=max).contains(&n) {
        Ok(n)
    } else {
        Err(ConfigError::ValueOutOfRange {
            field: field.to_string(),
            value: n.to_string(),
            expected: format!("{min}-{max} (default {default})"),
        })
    }
}
