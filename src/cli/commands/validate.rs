//! `validate` command handler
//!
//! Loads every given file, reports the outcome per file, and fails if any
//! file does not load. With `--strict`, load warnings count as failures.
//! A canopy shading abort stops validation at that file.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::config::{ConfigLoader, LoadWarning};
use crate::error::{ConfigError, Error};

/// Outcome of validating one file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub warnings: Vec<LoadWarning>,
}

/// Totals over all files.
#[derive(Debug, Default, Serialize)]
pub struct Summary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub warnings: usize,
}

#[derive(Debug, Serialize)]
struct Report {
    files: Vec<FileReport>,
    summary: Summary,
}

/// Validate input files.
///
/// # Errors
///
/// Returns [`Error::ValidationFailed`] if any file is invalid, the abort
/// error as soon as a file trips it, or a serialization error for JSON
/// output.
pub fn run(args: &ValidateArgs) -> Result<(), Error> {
    let loader = ConfigLoader::with_defaults();
    let files = args
        .files
        .iter()
        .map(|path| check(&loader, path, args.strict))
        .collect::<Result<Vec<_>, _>>()?;
    let summary = summarize(&files);

    match args.format {
        OutputFormat::Human => print_human(&files, &summary),
        OutputFormat::Json => {
            let report = Report { files, summary };
            println!("{}", serde_json::to_string_pretty(&report)?);
            return finish(&report.summary);
        }
    }

    finish(&summary)
}

/// Loads one file and records the outcome.
///
/// # Errors
///
/// Returns the error itself, instead of a report, when loading aborts.
pub fn check(loader: &ConfigLoader, path: &Path, strict: bool) -> Result<FileReport, Error> {
    tracing::info!(file = %path.display(), "validating configuration");

    match loader.load(path) {
        Ok(result) => {
            super::log_warnings(&result.warnings);
            let valid = !(strict && !result.warnings.is_empty());
            let error = (!valid).then(|| {
                format!(
                    "{} warning(s) treated as errors (--strict)",
                    result.warnings.len()
                )
            });
            if valid {
                tracing::info!(file = %path.display(), "configuration valid");
            }
            Ok(FileReport {
                path: path.to_path_buf(),
                valid,
                error,
                warnings: result.warnings,
            })
        }
        Err(e @ ConfigError::CanopyShadingRequiresStreamTemperature) => Err(e.into()),
        Err(e) => {
            tracing::debug!(file = %path.display(), error = %e, "configuration invalid");
            Ok(FileReport {
                path: path.to_path_buf(),
                valid: false,
                error: Some(e.to_string()),
                warnings: Vec::new(),
            })
        }
    }
}

fn summarize(files: &[FileReport]) -> Summary {
    files.iter().fold(Summary::default(), |mut acc, file| {
        acc.total += 1;
        if file.valid {
            acc.valid += 1;
        } else {
            acc.invalid += 1;
        }
        acc.warnings += file.warnings.len();
        acc
    })
}

fn print_human(files: &[FileReport], summary: &Summary) {
    for file in files {
        match &file.error {
            None => println!("{}: ok", file.path.display()),
            Some(error) => println!("{}: {error}", file.path.display()),
        }
        for warning in &file.warnings {
            match &warning.location {
                Some(location) => println!("  warning: {} ({location})", warning.message),
                None => println!("  warning: {}", warning.message),
            }
        }
    }
    println!(
        "{} file(s) checked: {} valid, {} invalid, {} warning(s)",
        summary.total, summary.valid, summary.invalid, summary.warnings
    );
}

fn finish(summary: &Summary) -> Result<(), Error> {
    if summary.invalid > 0 {
        return Err(Error::ValidationFailed {
            failed: summary.invalid,
            total: summary.total,
        });
    }
    Ok(())
}
