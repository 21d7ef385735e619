//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application settings.

mod gates;
mod storage;

pub use gates::FileGatesConfig;
pub use storage::{FileLoggingConfig, FileNotificationsConfig, FileStorageConfig};

use estate_quorum_application::GateSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
}

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub message: String,
}

impl ConfigIssue {
    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Approver groups and committee trigger
    pub gates: FileGatesConfig,
    /// State snapshot location
    pub storage: FileStorageConfig,
    /// Transition notification delivery
    pub notifications: FileNotificationsConfig,
    /// Log output
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.gates.committee_group.trim().is_empty() {
            issues.push(ConfigIssue::error("gates.committee_group cannot be empty"));
        }
        if self.gates.staff_group.trim().is_empty() {
            issues.push(ConfigIssue::error("gates.staff_group cannot be empty"));
        }
        if !self.gates.committee_group.trim().is_empty()
            && self.gates.committee_group.trim() == self.gates.staff_group.trim()
        {
            issues.push(ConfigIssue::warning(format!(
                "gates: committee and checklist share the group '{}'",
                self.gates.committee_group.trim()
            )));
        }
        if self.gates.committee_amount_threshold == 0 {
            issues.push(ConfigIssue::warning(
                "gates.committee_amount_threshold is 0; every loan requires committee approval",
            ));
        }
        if self.storage.state_file.as_os_str().is_empty() {
            issues.push(ConfigIssue::error("storage.state_file cannot be empty"));
        }

        issues
    }

    /// Convert into application settings, refusing unusable values
    pub fn to_settings(&self) -> Result<GateSettings, ConfigValidationError> {
        if self.gates.committee_group.trim().is_empty() {
            return Err(ConfigValidationError::EmptyField("gates.committee_group"));
        }
        if self.gates.staff_group.trim().is_empty() {
            return Err(ConfigValidationError::EmptyField("gates.staff_group"));
        }
        Ok(self.gates.to_settings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_quorum_domain::GateKind;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[gates]
committee_group = "lending_committee"
staff_group = "finance"
committee_amount_threshold = 500000

[storage]
state_file = "/var/lib/estate-quorum/state.json"

[notifications]
outbox = "/var/spool/estate-quorum/outbox.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gates.committee_group, "lending_committee");
        assert_eq!(config.gates.committee_amount_threshold, 500_000);
        assert_eq!(
            config.notifications.outbox,
            Some(PathBuf::from("/var/spool/estate-quorum/outbox.jsonl"))
        );

        let settings = config.to_settings().unwrap();
        assert_eq!(
            settings.pool_group(GateKind::PayoutChecklist).as_str(),
            "finance"
        );
        assert!(settings.committee_trigger.requires_committee(500_000));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[gates]
staff_group = "finance"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gates.staff_group, "finance");
        // Defaults should apply
        assert_eq!(config.gates.committee_group, "committee_members");
        assert_eq!(config.gates.committee_amount_threshold, 1_000_000);
        assert!(config.notifications.outbox.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_empty_group() {
        let mut config = FileConfig::default();
        config.gates.staff_group = "  ".to_string();

        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(matches!(
            config.to_settings(),
            Err(ConfigValidationError::EmptyField("gates.staff_group"))
        ));
    }

    #[test]
    fn test_validate_warns_on_shared_group() {
        let mut config = FileConfig::default();
        config.gates.staff_group = config.gates.committee_group.clone();

        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(config.to_settings().is_ok());
    }
}
