//! Configuration for the detectors
//!
//! Reads configuration from `jsdetect.toml`, `.jsdetect.toml`,
//! `.jsdetect.yaml` or `.jsdetect.json`. Every detector has its own table
//! keyed by rule id; unknown keys are rejected.
//!
//! ```toml
//! [rules.callback-return]
//! callbackNames = ["callback", "cb", "next"]
//!
//! [rules.no-empty-pattern]
//! allowObjectPatternsAsParameters = true
//!
//! [rules.no-self-compare]
//! severity = "warning"
//!
//! [rules.no-extra-bind]
//! enabled = false
//! ```

use crate::analysis::detectors::DEFAULT_CALLBACK_NAMES;
use crate::analysis::Severity;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Rule ids known to this crate
pub const RULE_IDS: &[&str] = &[
    "callback-return",
    "no-empty-pattern",
    "no-self-compare",
    "no-extra-bind",
];

const DEFAULT_LOCATIONS: &[&str] = &[
    "jsdetect.toml",
    ".jsdetect.toml",
    ".jsdetect.yaml",
    ".jsdetect.yml",
    ".jsdetect.json",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub rules: RulesConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    #[serde(rename = "callback-return")]
    pub callback_return: CallbackReturnOptions,
    #[serde(rename = "no-empty-pattern")]
    pub no_empty_pattern: EmptyPatternOptions,
    #[serde(rename = "no-self-compare")]
    pub no_self_compare: RuleToggle,
    #[serde(rename = "no-extra-bind")]
    pub no_extra_bind: RuleToggle,
}

/// Options of `callback-return`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct CallbackReturnOptions {
    pub enabled: bool,
    pub severity: Option<Severity>,
    /// Callee texts treated as callbacks, e.g. `cb` or `res.send`
    pub callback_names: Vec<String>,
}

impl Default for CallbackReturnOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
            callback_names: DEFAULT_CALLBACK_NAMES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

/// Options of `no-empty-pattern`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct EmptyPatternOptions {
    pub enabled: bool,
    pub severity: Option<Severity>,
    pub allow_object_patterns_as_parameters: bool,
}

impl Default for EmptyPatternOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
            allow_object_patterns_as_parameters: false,
        }
    }
}

/// Settings shared by rules without options of their own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleToggle {
    pub enabled: bool,
    pub severity: Option<Severity>,
}

impl Default for RuleToggle {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file, picking the format by extension
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let config: Self = match ext {
            "toml" => toml::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "unknown config file format: {}",
                    path.display()
                )))
            }
        };

        config.validate()?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Look for a config file in `dir`, falling back to the defaults
    pub fn from_default_locations(dir: &Path) -> Result<Self, ConfigError> {
        for name in DEFAULT_LOCATIONS {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Self::from_file(&candidate);
            }
        }
        debug!("no config file in {}, using defaults", dir.display());
        Ok(Self::default())
    }

    /// Checks serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        let names = &self.rules.callback_return.callback_names;
        if names.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "callback-return: callbackNames must not contain empty names".to_string(),
            ));
        }
        Ok(())
    }

    /// Disable every rule not listed in `rule_ids`
    pub fn enable_only(&mut self, rule_ids: &[String]) -> Result<(), ConfigError> {
        if let Some(unknown) = rule_ids.iter().find(|id| !RULE_IDS.contains(&id.as_str())) {
            return Err(ConfigError::Invalid(format!("unknown rule '{}'", unknown)));
        }
        let keep = |id: &str| rule_ids.iter().any(|r| r == id);

        let rules = &mut self.rules;
        rules.callback_return.enabled &= keep("callback-return");
        rules.no_empty_pattern.enabled &= keep("no-empty-pattern");
        rules.no_self_compare.enabled &= keep("no-self-compare");
        rules.no_extra_bind.enabled &= keep("no-extra-bind");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(
            config.rules.callback_return.callback_names,
            vec!["callback", "cb", "next"]
        );
        assert!(!config.rules.no_empty_pattern.allow_object_patterns_as_parameters);
        assert!(config.rules.no_self_compare.enabled);
        assert!(config.rules.no_extra_bind.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config = Config::from_toml(
            r#"
            [rules.callback-return]
            callbackNames = ["done", "res.send"]

            [rules.no-empty-pattern]
            allowObjectPatternsAsParameters = true

            [rules.no-extra-bind]
            enabled = false
            severity = "error"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.rules.callback_return.callback_names,
            vec!["done", "res.send"]
        );
        assert!(config.rules.callback_return.enabled);
        assert!(config.rules.no_empty_pattern.allow_object_patterns_as_parameters);
        assert!(!config.rules.no_extra_bind.enabled);
        assert_eq!(config.rules.no_extra_bind.severity, Some(Severity::Error));
        assert!(config.rules.no_self_compare.enabled);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(matches!(
            Config::from_toml("[rules.no-empty-pattern]\nallowArrays = true\n"),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            Config::from_toml("[rules.no-such-rule]\nenabled = true\n"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_wrong_option_type_rejected() {
        assert!(Config::from_toml("[rules.callback-return]\ncallbackNames = \"cb\"\n").is_err());
        assert!(
            Config::from_toml("[rules.no-empty-pattern]\nallowObjectPatternsAsParameters = 1\n")
                .is_err()
        );
    }

    #[test]
    fn test_invalid_callback_names() {
        assert!(matches!(
            Config::from_toml("[rules.callback-return]\ncallbackNames = [\"\"]\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_toml("[rules.callback-return]\ncallbackNames = [\" \"]\n"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_duplicate_callback_names_accepted() {
        let config =
            Config::from_toml("[rules.callback-return]\ncallbackNames = [\"cb\", \"cb\"]\n")
                .unwrap();
        assert_eq!(config.rules.callback_return.callback_names, vec!["cb", "cb"]);
    }

    #[test]
    fn test_from_file_formats() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("config.yaml");
        std::fs::write(
            &yaml,
            "rules:\n  no-empty-pattern:\n    allowObjectPatternsAsParameters: true\n",
        )
        .unwrap();
        let config = Config::from_file(&yaml).unwrap();
        assert!(config.rules.no_empty_pattern.allow_object_patterns_as_parameters);

        let json = dir.path().join("config.json");
        std::fs::write(
            &json,
            r#"{"rules": {"callback-return": {"callbackNames": ["next"]}}}"#,
        )
        .unwrap();
        let config = Config::from_file(&json).unwrap();
        assert_eq!(config.rules.callback_return.callback_names, vec!["next"]);

        let ini = dir.path().join("config.ini");
        std::fs::write(&ini, "").unwrap();
        assert!(matches!(
            Config::from_file(&ini),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_default_locations() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::from_default_locations(dir.path()).unwrap(), Config::default());

        std::fs::write(
            dir.path().join(".jsdetect.toml"),
            "[rules.no-self-compare]\nenabled = false\n",
        )
        .unwrap();
        let config = Config::from_default_locations(dir.path()).unwrap();
        assert!(!config.rules.no_self_compare.enabled);
    }

    #[test]
    fn test_enable_only() {
        let mut config = Config::default();
        config
            .enable_only(&["no-extra-bind".to_string()])
            .unwrap();
        assert!(config.rules.no_extra_bind.enabled);
        assert!(!config.rules.callback_return.enabled);
        assert!(!config.rules.no_empty_pattern.enabled);
        assert!(!config.rules.no_self_compare.enabled);

        assert!(config.enable_only(&["bogus".to_string()]).is_err());
    }
}
