//! Input file reader
//!
//! Turns the textual input file into a flat table of
//! `(section, key) -> value` entries. The format is line oriented:
//!
//! ```text
//! # comment
//! [OPTIONS]
//! Format       = BIN      # trailing comment
//! Extent       = BASIN
//! ```
//!
//! Section and key names are matched case-insensitively; values keep their
//! case. The first occurrence of a duplicated key wins.

use indexmap::IndexMap;
use indexmap::map::Entry;
use std::path::Path;

use crate::config::loader::LoadWarning;
use crate::error::ConfigError;

/// A single raw input entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputValue {
    /// Trimmed value text.
    pub value: String,

    /// 1-based source line, `None` for programmatic entries.
    pub line: Option<usize>,
}

/// Parsed input collection, in file order.
#[derive(Debug, Clone, Default)]
pub struct InputTable {
    entries: IndexMap<(String, String), InputValue>,
    warnings: Vec<LoadWarning>,
}

impl InputTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses input text.
    ///
    /// `source` is used only for error and warning locations.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] for an entry outside any section,
    /// an unterminated or empty section header, or a line that is neither a
    /// header nor a `KEY = VALUE` pair.
    pub fn parse(text: &str, source: &Path) -> Result<Self, ConfigError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut table = Self::new();
        let mut section: Option<String> = None;

        for (index, raw_line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = strip_comment(raw_line).trim();
            if line.is_empty() {
                continue;
            }

            let parse_error = |message: &str| ConfigError::ParseError {
                path: source.to_path_buf(),
                line: Some(line_no),
                message: message.to_string(),
            };

            if let Some(rest) = line.strip_prefix('[') {
                let name = rest
                    .strip_suffix(']')
                    .ok_or_else(|| parse_error("unterminated section header"))?
                    .trim();
                if name.is_empty() {
                    return Err(parse_error("empty section name"));
                }
                section = Some(normalize(name));
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(parse_error("expected 'KEY = VALUE' or '[SECTION]'"));
            };
            let Some(current) = section.as_deref() else {
                return Err(parse_error("entry appears before any [SECTION] header"));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(parse_error("empty key name"));
            }

            table.insert_at(current, key, value.trim(), Some(line_no), source);
        }

        Ok(table)
    }

    /// Adds an entry programmatically.
    ///
    /// Returns `false` (and records a warning) if the key was already present.
    pub fn insert(&mut self, section: &str, key: &str, value: &str) -> bool {
        self.insert_at(section, key, value, None, Path::new("<input>"))
    }

    fn insert_at(
        &mut self,
        section: &str,
        key: &str,
        value: &str,
        line: Option<usize>,
        source: &Path,
    ) -> bool {
        let id = (normalize(section), normalize(key));
        match self.entries.entry(id) {
            Entry::Occupied(existing) => {
                let (section, key) = existing.key();
                let first = existing
                    .get()
                    .line
                    .map_or_else(String::new, |l| format!(" (first set on line {l})"));
                self.warnings.push(LoadWarning {
                    message: format!("Duplicate key '{key}' in [{section}] ignored{first}"),
                    location: Some(location(source, line)),
                });
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(InputValue {
                    value: value.to_string(),
                    line,
                });
                true
            }
        }
    }

    /// Looks up a value by section and key, ignoring case.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&InputValue> {
        self.entries.get(&(normalize(section), normalize(key)))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Warnings produced while building the table.
    #[must_use]
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }
}

/// Removes a comment and everything after it.
///
/// A `#` opens a comment at the start of the line or after whitespace, so
/// values such as `runs/#3/sed.txt` are kept whole.
fn strip_comment(line: &str) -> &str {
    let mut prev_is_space = true;
    for (i, c) in line.char_indices() {
        if c == '#' && prev_is_space {
            return &line[..i];
        }
        prev_is_space = c.is_whitespace();
    }
    line
}

/// Canonical form for section and key matching.
fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase()
}

fn location(source: &Path, line: Option<usize>) -> String {
    match line {
        Some(l) => format!("{}:{l}", source.display()),
        None => source.display().to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
