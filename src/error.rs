//! Error types for `dhsvm-config`
//!
//! The load pass produces exactly one validation error kind,
//! [`ConfigError::InvalidConfigValue`], plus the separate canopy-shading
//! abort and the failures of the input-file reader. Everything is returned
//! to a single top-level caller that reports and exits.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::schema::Section;

// ============================================================================
// Exit Codes
// ============================================================================

/// Process exit codes for `dhsvm-config` operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (unreadable input, invalid value)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Immediate abort on an illegal option combination.
    ///
    /// Matches the status historically produced by `exit(-1)`.
    pub const ABORTED: i32 = 255;
}

/// Fixed diagnostic codes attached to configuration failures.
pub struct ErrorCode;

impl ErrorCode {
    /// Input value not valid for its key.
    pub const INVALID_VALUE: u32 = 51;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `dhsvm-config` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// One or more files failed `validate`
    #[error("{failed} of {total} file(s) failed validation")]
    ValidationFailed {
        /// Number of failing files
        failed: usize,
        /// Number of files checked
        total: usize,
    },
}

impl Error {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(ConfigError::CanopyShadingRequiresStreamTemperature) => ExitCode::ABORTED,
            Self::Config(_) | Self::ValidationFailed { .. } => ExitCode::CONFIG_ERROR,
            Self::Json(_) | Self::Yaml(_) => ExitCode::ERROR,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }

    /// Returns `true` if this error takes the immediate-abort path.
    ///
    /// Aborts are reported with their bare message instead of going
    /// through the generic `error:` reporter.
    #[must_use]
    pub const fn is_abort(&self) -> bool {
        matches!(
            self,
            Self::Config(ConfigError::CanopyShadingRequiresStreamTemperature)
        )
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A resolved value failed to decode, parse, or satisfy a cross-field rule.
    #[error("invalid value for [{section}] {key}: '{value}' ({reason}) [error {code}]")]
    InvalidConfigValue {
        /// Section of the offending entry
        section: Section,
        /// Key name of the offending entry
        key: &'static str,
        /// The resolved string that was rejected
        value: String,
        /// What was expected instead
        reason: String,
        /// Fixed diagnostic code
        code: u32,
    },

    /// Canopy shading was requested while the stream temperature module is off.
    #[error("Stream temp module must be turned on to allow canopy shading options")]
    CanopyShadingRequiresStreamTemperature,

    /// The input file could not be parsed into section/key/value entries.
    #[error("parse error in {path}{}: {message}", line.map_or_else(String::new, |l| format!(" (line {l})")))]
    ParseError {
        /// Path to the input file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Description of the problem
        message: String,
    },

    /// Input file not found or unreadable
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },
}

impl ConfigError {
    /// Builds an [`ConfigError::InvalidConfigValue`] with the standard code.
    #[must_use]
    pub fn invalid(
        section: Section,
        key: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfigValue {
            section,
            key,
            value: value.into(),
            reason: reason.into(),
            code: ErrorCode::INVALID_VALUE,
        }
    }

    /// Returns the offending key name, if this error names one.
    #[must_use]
    pub const fn key(&self) -> Option<&'static str> {
        match self {
            Self::InvalidConfigValue { key, .. } => Some(*key),
            _ => None,
        }
    }
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `dhsvm-config` operations.
pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// Tests
// ============================================================================
