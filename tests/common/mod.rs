//! Shared integration-test harness for running the `dhsvm-config` binary
//! and locating input fixtures.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Helpers around the built `dhsvm-config` binary.
pub struct DhsvmConfigProcess;

impl DhsvmConfigProcess {
    /// Runs the binary with `args` to completion and captures its output.
    ///
    /// Environment overrides that would change results are cleared.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command(args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_dhsvm-config"))
            .args(args)
            .env_remove("DHSVM_LOG_LEVEL")
            .env_remove("DHSVM_LOG_FORMAT")
            .env_remove("DHSVM_CONFIG")
            .env_remove("DHSVM_MAX_VALUE_LEN")
            .env_remove("DHSVM_MAX_CONFIG_SIZE")
            .env("DHSVM_COLOR", "never")
            .output()
            .expect("failed to run dhsvm-config")
    }

    /// Runs `validate` on a single file.
    #[allow(clippy::missing_panics_doc)]
    pub fn validate(path: &Path, extra: &[&str]) -> Output {
        let mut args = vec!["validate", path.to_str().expect("non-UTF-8 path")];
        args.extend_from_slice(extra);
        Self::spawn_command(&args)
    }

    /// Returns the path to a test fixture.
    #[must_use]
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    /// Reads a fixture as text.
    #[allow(clippy::missing_panics_doc)]
    #[must_use]
    pub fn fixture_text(name: &str) -> String {
        std::fs::read_to_string(Self::fixture_path(name)).expect("fixture not readable")
    }
}

/// Returns `text` with the first line starting with `key` (ignoring leading
/// whitespace) replaced by `key = value`.
#[allow(clippy::missing_panics_doc)]
#[must_use]
pub fn set_value(text: &str, key: &str, value: &str) -> String {
    let mut found = false;
    let lines: Vec<String> = text
        .lines()
        .map(|line| {
            let matches = line
                .trim_start()
                .split('=')
                .next()
                .is_some_and(|k| k.trim().eq_ignore_ascii_case(key));
            if matches && !found {
                found = true;
                format!("{key} = {value}")
            } else {
                line.to_string()
            }
        })
        .collect();
    assert!(found, "fixture has no key {key:?}");
    lines.join("\n") + "\n"
}
