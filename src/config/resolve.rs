//! Raw value resolution.
//!
//! Pairs every schema entry with the matching input value, falling back to
//! the declared default, and freezes the result as a [`ResolvedTable`].

use crate::config::input::InputTable;
use crate::config::schema::{Key, SCHEMA, SCHEMA_LEN, Section};
use crate::error::ConfigError;

/// Limits applied while reading and resolving input.
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    /// Maximum length of a single resolved value, in characters.
    pub max_value_len: usize,

    /// Maximum input file size in bytes.
    pub max_config_size: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_value_len: env_or("DHSVM_MAX_VALUE_LEN", 255),
            max_config_size: env_or("DHSVM_MAX_CONFIG_SIZE", 10 * 1024 * 1024),
        }
    }
}

/// Reads a numeric limit from the environment, or returns `default`.
fn env_or(var: &str, default: usize) -> usize {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// One schema entry together with its resolved value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub section: Section,
    pub key: &'static str,
    pub default: &'static str,
    pub resolved: String,
}

/// Resolved values for the whole schema, indexed by [`Key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTable {
    entries: Vec<ConfigEntry>,
}

impl ResolvedTable {
    /// Resolved value for `key`.
    #[must_use]
    pub fn get(&self, key: Key) -> &str {
        &self.entries[key as usize].resolved
    }

    /// All entries in schema order.
    #[must_use]
    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }
}

/// Resolves every schema entry against `input`.
///
/// # Errors
///
/// Returns an invalid-value error for the first value longer than
/// `limits.max_value_len` characters. Values are never truncated.
pub fn resolve(input: &InputTable, limits: &ConfigLimits) -> Result<ResolvedTable, ConfigError> {
    let mut entries = Vec::with_capacity(SCHEMA_LEN);

    for schema in &SCHEMA {
        let resolved = input
            .get(schema.section.name(), schema.name)
            .map_or(schema.default, |v| v.value.as_str());

        let length = resolved.chars().count();
        if length > limits.max_value_len {
            return Err(schema.key.invalid(
                resolved,
                format!(
                    "value is {length} characters long, at most {} allowed",
                    limits.max_value_len
                ),
            ));
        }

        entries.push(ConfigEntry {
            section: schema.section,
            key: schema.name,
            default: schema.default,
            resolved: resolved.to_string(),
        });
    }

    Ok(ResolvedTable { entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(max_value_len: usize) -> ConfigLimits {
        ConfigLimits {
            max_value_len,
            max_config_size: 1024,
        }
    }

    #[test]
    fn test_resolves_in_schema_order() {
        let mut input = InputTable::new();
        input.insert("TIME", "MODEL END", "01/01/2000-00");
        input.insert("OPTIONS", "FORMAT", "BIN");

        let table = resolve(&input, &limits(255)).unwrap();

        assert_eq!(table.entries().len(), SCHEMA_LEN);
        assert_eq!(table.entries()[0].key, "FORMAT");
        assert_eq!(table.get(Key::Format), "BIN");
        assert_eq!(table.get(Key::ModelEnd), "01/01/2000-00");
    }

    #[test]
    fn test_missing_key_falls_back_to_default() {
        let table = resolve(&InputTable::new(), &limits(255)).unwrap();
        assert_eq!(table.get(Key::Extent), Key::Extent.entry().default);
        assert!(table.get(Key::Extent).is_empty());
    }

    #[test]
    fn test_same_name_in_different_sections_resolved_separately() {
        let mut input = InputTable::new();
        input.insert("OPTIONS", "TEMPERATURE LAPSE RATE", "CONSTANT");
        input.insert("CONSTANTS", "TEMPERATURE LAPSE RATE", "-0.0065");

        let table = resolve(&input, &limits(255)).unwrap();

        assert_eq!(table.get(Key::TemperatureLapseMode), "CONSTANT");
        assert_eq!(table.get(Key::TemperatureLapseRate), "-0.0065");
    }

    #[test]
    fn test_overlong_value_rejected_not_truncated() {
        let mut input = InputTable::new();
        input.insert("OPTIONS", "PRISM DATA PATH", &"x".repeat(11));

        assert!(resolve(&input, &limits(11)).is_ok());
        let err = resolve(&input, &limits(10)).unwrap_err();
        assert_eq!(err.key(), Some("PRISM DATA PATH"));
        assert!(err.to_string().contains("11 characters long"));
    }

    #[test]
    fn test_env_or_falls_back_on_unset_var() {
        assert_eq!(env_or("DHSVM_TEST_UNSET_LIMIT_VAR", 7), 7);
    }
}
