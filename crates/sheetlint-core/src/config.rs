//! Configuration types for sheetlint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::budget::{BudgetScope, DEFAULT_MAX_ERRORS};

/// Mapping from rule name to its configured value.
pub type RuleSettings = BTreeMap<String, RuleConfig>;

/// Top-level configuration for sheetlint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Preset supplying default rule settings (e.g., "recommended", "strict", "minimal").
    #[serde(default)]
    pub preset: Option<String>,

    /// Maximum number of findings per budget scope.
    #[serde(default = "default_max_errors")]
    pub max_errors: usize,

    /// Whether the error budget resets per file or spans the whole run.
    #[serde(default)]
    pub budget: BudgetScope,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: RuleSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preset: None,
            max_errors: DEFAULT_MAX_ERRORS,
            budget: BudgetScope::default(),
            analyzer: AnalyzerConfig::default(),
            rules: RuleSettings::new(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Sets the value for one rule.
    #[must_use]
    pub fn with_rule(mut self, name: impl Into<String>, value: impl Into<RuleConfig>) -> Self {
        self.rules.insert(name.into(), value.into());
        self
    }

    /// Sets the maximum number of findings.
    #[must_use]
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Gets the configuration for a rule.
    #[must_use]
    pub fn rule(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }

    /// Checks if a rule is enabled. Absent rules are disabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rule(rule_name).is_some_and(RuleConfig::is_enabled)
    }

    /// Fills in settings for rules the user did not configure.
    pub fn apply_defaults(&mut self, defaults: RuleSettings) {
        for (name, value) in defaults {
            self.rules.entry(name).or_insert(value);
        }
    }
}

fn default_max_errors() -> usize {
    DEFAULT_MAX_ERRORS
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// File extensions to analyze.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Maximum number of parallel file analyses.
    #[serde(default)]
    pub parallelism: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: vec!["**/node_modules/**".to_string(), "**/vendor/**".to_string()],
            extensions: default_extensions(),
            respect_gitignore: true,
            parallelism: None,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_extensions() -> Vec<String> {
    vec!["css".to_string()]
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration value.
///
/// A rule may be configured with a boolean flag (`zero-unit = true`), a
/// numeric threshold (`max-floats = 10`), or a table of options
/// (`no-named-colors = { allow = ["white"] }`). Absent or falsy values mean
/// the rule is off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleConfig(toml::Value);

impl RuleConfig {
    /// Wraps a raw TOML value.
    #[must_use]
    pub fn new(value: toml::Value) -> Self {
        Self(value)
    }

    /// Returns the raw TOML value.
    #[must_use]
    pub fn value(&self) -> &toml::Value {
        &self.0
    }

    /// Returns true unless the value is falsy.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        match &self.0 {
            toml::Value::Boolean(enabled) => *enabled,
            toml::Value::Integer(number) => *number != 0,
            toml::Value::Float(number) => *number != 0.0,
            toml::Value::String(text) => !text.is_empty(),
            toml::Value::Array(items) => !items.is_empty(),
            toml::Value::Table(table) => table
                .get("enabled")
                .and_then(toml::Value::as_bool)
                .unwrap_or(true),
            toml::Value::Datetime(_) => true,
        }
    }

    /// Returns the positive numeric threshold, if the value is one.
    ///
    /// Tables provide it under the `max` key.
    #[must_use]
    pub fn threshold(&self) -> Option<u64> {
        let value = match &self.0 {
            toml::Value::Table(table) => table.get("max")?,
            other => other,
        };
        match value {
            toml::Value::Integer(number) => u64::try_from(*number).ok().filter(|n| *n > 0),
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            toml::Value::Float(number) if number.is_finite() && *number >= 1.0 => {
                Some(*number as u64)
            }
            _ => None,
        }
    }

    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.option(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets a string array option.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.option(key)
            .and_then(toml::Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn option(&self, key: &str) -> Option<&toml::Value> {
        self.options()?.get(key)
    }

    fn options(&self) -> Option<&toml::Table> {
        self.0.as_table()
    }
}

impl From<bool> for RuleConfig {
    fn from(enabled: bool) -> Self {
        Self(toml::Value::Boolean(enabled))
    }
}

impl From<i64> for RuleConfig {
    fn from(threshold: i64) -> Self {
        Self(toml::Value::Integer(threshold))
    }
}

impl From<toml::Value> for RuleConfig {
    fn from(value: toml::Value) -> Self {
        Self(value)
    }
}

impl From<toml::Table> for RuleConfig {
    fn from(table: toml::Table) -> Self {
        Self(toml::Value::Table(table))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(config.rules.is_empty());
        assert_eq!(config.max_errors, DEFAULT_MAX_ERRORS);
        assert_eq!(config.budget, BudgetScope::File);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
max_errors = 25
budget = "batch"

[analyzer]
root = "./styles"
exclude = ["**/generated/**"]

[rules]
zero-unit = true
no-important = false
max-floats = 3
no-named-colors = { allow = ["white", "black"] }
empty-rules = { enabled = false }
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.max_errors, 25);
        assert_eq!(config.budget, BudgetScope::Batch);
        assert_eq!(config.analyzer.root, PathBuf::from("./styles"));

        assert!(config.is_rule_enabled("zero-unit"));
        assert!(!config.is_rule_enabled("no-important"));
        assert!(!config.is_rule_enabled("empty-rules"));
        assert!(!config.is_rule_enabled("not-configured"));
        assert!(config.is_rule_enabled("no-named-colors"));

        assert_eq!(config.rule("max-floats").and_then(RuleConfig::threshold), Some(3));
        let colors = config.rule("no-named-colors").unwrap();
        assert_eq!(colors.get_str_array("allow"), vec!["white", "black"]);
    }

    #[test]
    fn test_threshold_requires_positive_number() {
        assert_eq!(RuleConfig::from(true).threshold(), None);
        assert_eq!(RuleConfig::from(0).threshold(), None);
        assert_eq!(RuleConfig::from(-2).threshold(), None);
        assert_eq!(RuleConfig::from(toml::Value::Float(2.5)).threshold(), Some(2));

        let mut table = toml::Table::new();
        table.insert("max".into(), toml::Value::Integer(4));
        assert_eq!(RuleConfig::from(table).threshold(), Some(4));
    }

    #[test]
    fn test_falsy_values_disable() {
        assert!(!RuleConfig::from(0).is_enabled());
        assert!(!RuleConfig::from(toml::Value::String(String::new())).is_enabled());
        assert!(RuleConfig::from(5).is_enabled());
    }

    #[test]
    fn test_apply_defaults_keeps_user_values() {
        let mut config = Config::default().with_rule("zero-unit", false);
        let mut defaults = RuleSettings::new();
        defaults.insert("zero-unit".into(), RuleConfig::from(true));
        defaults.insert("no-import".into(), RuleConfig::from(true));

        config.apply_defaults(defaults);
        assert!(!config.is_rule_enabled("zero-unit"));
        assert!(config.is_rule_enabled("no-import"));
    }
}
