//! Declarative policy configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level policy configuration.
///
/// ```json
/// {
///   "name": "acme-api-style",
///   "version": "1.0",
///   "includeStandardRules": true,
///   "rules": {
///     "operation-operationid-style-camelcase": {"severity": "error"},
///     "operation-summary-exist": {"severity": "warning"}
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfig {
    /// Policy name.
    #[serde(default)]
    pub name: String,

    /// Policy version.
    #[serde(default)]
    pub version: String,

    /// Whether rule names may resolve against the standard collection.
    #[serde(default)]
    pub include_standard_rules: bool,

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

impl PolicyConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the policy version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets whether the standard collection is consulted.
    #[must_use]
    pub fn include_standard_rules(mut self, include: bool) -> Self {
        self.include_standard_rules = include;
        self
    }

    /// Adds or replaces a rule entry.
    #[must_use]
    pub fn rule(mut self, name: impl Into<String>, severity: impl Into<String>) -> Self {
        self.rules.insert(
            name.into(),
            RuleConfig {
                severity: severity.into(),
            },
        );
        self
    }

    /// Loads configuration from a file.
    ///
    /// Files ending in `.toml` are read as TOML, everything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if path.extension().is_some_and(|ext| ext == "toml") {
            Self::parse_toml(&content)
        } else {
            Self::parse_json(&content)
        }
    }

    /// Parses configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn parse_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Serializes the configuration as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Gets the configured severity string for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<&str> {
        self.rules.get(rule_name).map(|c| c.severity.as_str())
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Severity name. Empty means `error`.
    #[serde(default)]
    pub severity: String,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read policy file {path}: {source}")]
    #[diagnostic(code(openapi_lint::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse policy: {message}")]
    #[diagnostic(
        code(openapi_lint::config::parse),
        help("expected fields: name, version, includeStandardRules, rules")
    )]
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
        let config = PolicyConfig::default();
        assert!(!config.include_standard_rules);
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "name": "acme",
            "version": "1.0",
            "includeStandardRules": true,
            "rules": {
                "operation-summary-exist": {"severity": "warning"},
                "tag-style-first-uppercase": {}
            }
        }"#;

        let config = PolicyConfig::parse_json(json).expect("Failed to parse");
        assert_eq!(config.name, "acme");
        assert!(config.include_standard_rules);
        assert_eq!(config.rule_severity("operation-summary-exist"), Some("warning"));
        assert_eq!(config.rule_severity("tag-style-first-uppercase"), Some(""));
        assert_eq!(config.rule_severity("missing"), None);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
name = "acme"
includeStandardRules = true

[rules.operation-summary-exist]
severity = "hint"
"#;
        let config = PolicyConfig::parse_toml(toml).expect("Failed to parse");
        assert_eq!(config.rule_severity("operation-summary-exist"), Some("hint"));
    }

    #[test]
    fn test_parse_error() {
        let err = PolicyConfig::parse_json("{\"rules\": []}").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("policy.json");
        let config = PolicyConfig::new("p")
            .include_standard_rules(true)
            .rule("operation-summary-exist", "error");
        std::fs::write(&json_path, config.to_json_pretty().unwrap()).unwrap();
        assert_eq!(PolicyConfig::from_file(&json_path).unwrap(), config);

        let toml_path = dir.path().join("policy.toml");
        std::fs::write(&toml_path, "name = \"t\"\n").unwrap();
        assert_eq!(PolicyConfig::from_file(&toml_path).unwrap().name, "t");
    }

    #[test]
    fn test_missing_file() {
        let err = PolicyConfig::from_file(Path::new("/nonexistent/policy.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
