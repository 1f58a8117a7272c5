//! Configuration handling for form presentation

use crate::workflows::password::PasswordPolicy;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration for forms; every field falls back to a built-in default
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FormsConfig {
    /// Class for standard forms
    pub form_class: Option<String>,
    /// Class for table forms
    pub table_class: Option<String>,
    /// Browser autocomplete on new forms
    pub autocomplete: Option<bool>,
    /// Locale code passed to the translation service
    pub locale: Option<String>,
    /// Rules new passwords must meet
    pub password_policy: Option<PasswordPolicy>,
}

impl FormsConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "campus", "campus-forms")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded forms config");
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Policy for new passwords, the default when unset
    pub fn password_policy(&self) -> PasswordPolicy {
        self.password_policy.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = FormsConfig::default();
        assert!(config.form_class.is_none());
        assert!(config.table_class.is_none());
        assert!(config.autocomplete.is_none());
        assert!(config.locale.is_none());
        assert_eq!(config.password_policy(), PasswordPolicy::default());
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: FormsConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, FormsConfig::default());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        let json = r#"{"form_class": "compact", "unknown_field": "value"}"#;
        let parsed: FormsConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.form_class, Some("compact".to_string()));
    }

    #[test]
    fn test_partial_password_policy() {
        let json = r#"{"password_policy": {"min_length": 12}}"#;
        let parsed: FormsConfig = serde_json::from_str(json).unwrap();
        let policy = parsed.password_policy();
        assert_eq!(policy.min_length, 12);
        assert_eq!(policy.require_numeric, PasswordPolicy::default().require_numeric);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = FormsConfig {
            table_class: Some("fullWidth".to_string()),
            autocomplete: Some(false),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(FormsConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_from_invalid_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        let err = FormsConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FormsConfig::load_from(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn test_config_path_ends_with_file_name() {
        if let Some(path) = FormsConfig::config_path() {
            assert!(path.ends_with("config.json"));
        }
    }
}
