//! Configuration loader
//!
//! Single entry routine for the load pass:
//! 1. Read the input file (size limit, UTF-8 BOM)
//! 2. Parse `[SECTION]` / `KEY = VALUE` entries
//! 3. Resolve every schema entry against the input
//! 4. Decode and cross-check `[OPTIONS]`
//! 5. Read `[AREA]`, locate the point pixel in point mode
//! 6. Read `[TIME]`
//! 7. Assign `[CONSTANTS]`
//! 8. Freeze with `Arc`
//!
//! Any failing stage aborts the load; no partial configuration escapes.

use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use crate::config::constants::{self, PhysicalConstants};
use crate::config::geometry::{self, GridGeometry, SolarGeometry};
use crate::config::input::InputTable;
use crate::config::options::{Extent, RunOptions};
use crate::config::resolve::{ConfigLimits, ResolvedTable, resolve};
use crate::config::rules::RuleEngine;
use crate::config::schema::Key;
use crate::config::time::{self, TimeWindow};
use crate::error::ConfigError;

// ============================================================================
// Public API
// ============================================================================

/// Options for the configuration loader.
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    /// Limits for input size and value length.
    pub config_limits: ConfigLimits,
}

/// Fully validated run configuration.
///
/// Built once per load and shared read-only through an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunConfig {
    pub options: RunOptions,
    pub grid: GridGeometry,
    pub solar: SolarGeometry,
    pub time: TimeWindow,
    pub constants: PhysicalConstants,
}

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated configuration.
    pub config: Arc<RunConfig>,

    /// Every schema entry with its resolved string, including entries that
    /// are retained for other modules but not decoded here.
    pub entries: ResolvedTable,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during configuration loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Configuration loader.
///
/// Handles the full pipeline from input file to frozen [`RunConfig`]. The
/// loader holds no state between calls, so loading the same input twice
/// yields identical results.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    /// Creates a new configuration loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a new configuration loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Loads an input file and returns the frozen configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read or exceeds the size limit
    /// - The text is not valid `[SECTION]` / `KEY = VALUE` input
    /// - Any value fails to decode, parse, or satisfy a cross-field rule
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let max_size = self.options.config_limits.max_config_size;

        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;
        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if file_size > max_size {
            return Err(ConfigError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: format!("file is {file_size} bytes, at most {max_size} allowed"),
            });
        }

        let raw_content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => ConfigError::ParseError {
                path: path.to_path_buf(),
                line: None,
                message: "input is not valid UTF-8".to_string(),
            },
            _ => ConfigError::MissingFile {
                path: path.to_path_buf(),
            },
        })?;

        tracing::debug!(path = %path.display(), bytes = file_size, "read input file");
        self.load_source(&raw_content, path)
    }

    /// Loads configuration text that did not come from a file.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigLoader::load`], minus the file access failures.
    pub fn load_from_str(&self, text: &str) -> Result<LoadResult, ConfigError> {
        self.load_source(text, Path::new("<input>"))
    }

    /// Runs stages 3 to 8 over an already parsed input table.
    ///
    /// Warnings already recorded on `input` are carried into the result.
    ///
    /// # Errors
    ///
    /// Returns the first value or rule failure.
    pub fn load_table(&self, input: &InputTable) -> Result<LoadResult, ConfigError> {
        let mut warnings = input.warnings().to_vec();

        let entries = resolve(input, &self.options.config_limits)?;
        tracing::debug!(entries = entries.entries().len(), "resolved schema");

        let (mut options, notices) = RuleEngine::new(&entries).run()?;
        warnings.extend(notices);

        let (grid, solar) = geometry::read_area(&entries)?;

        if options.extent == Extent::Point {
            let pixel = geometry::read_point(&grid, &entries)?;
            if !grid.contains(pixel) {
                warnings.push(LoadWarning {
                    message: format!(
                        "Point pixel (row {}, col {}) lies outside the {}x{} grid",
                        pixel.row, pixel.col, grid.rows, grid.cols
                    ),
                    location: Some(Key::PointNorth.to_string()),
                });
            }
            tracing::debug!(row = pixel.row, col = pixel.col, "located point pixel");
            options.point = Some(pixel);
        }

        let time = time::read_window(&entries)?;
        let constants =
            constants::assign(&entries, options.temperature_lapse, options.precipitation_lapse)?;

        tracing::info!(
            extent = ?options.extent,
            rows = grid.rows,
            cols = grid.cols,
            steps = time.total_steps,
            warnings = warnings.len(),
            "configuration loaded"
        );

        Ok(LoadResult {
            config: Arc::new(RunConfig {
                options,
                grid,
                solar,
                time,
                constants,
            }),
            entries,
            warnings,
        })
    }

    fn load_source(&self, text: &str, source: &Path) -> Result<LoadResult, ConfigError> {
        let input = InputTable::parse(text, source)?;
        if input.is_empty() {
            return Err(ConfigError::ParseError {
                path: source.to_path_buf(),
                line: None,
                message: "Configuration file is empty".to_string(),
            });
        }
        self.load_table(&input)
    }
}

// ============================================================================
// Tests
// ============================================================================
