//! Configuration loading
//!
//! Settings come from a TOML file, then environment overrides:
//!
//! ```toml
//! [store]
//! path = ".snipx/store.db"
//!
//! [snippets]
//! short_code_length = 4
//! max_attempts = 5
//! max_content_bytes = 262144
//!
//! [logging]
//! profile = "production"
//!
//! [[scopes.groups]]
//! kind = "project"
//! id = "alpha"
//! ```
//!
//! Every section and key is optional. `SNIPX_DB_PATH` and
//! `SNIPX_LOG_PROFILE` override the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snipx_core::errors::{ExError, ExErrorKind};
use snipx_core::logging_facility::Profile;
use snipx_core::rules::CreatePolicy;
use snipx_core::scope::ScopeRequest;
use snipx_store::errors::Result;

pub const DEFAULT_CONFIG_FILE: &str = "snipx.toml";
pub const DEFAULT_DB_PATH: &str = ".snipx/store.db";

pub const ENV_DB_PATH: &str = "SNIPX_DB_PATH";
pub const ENV_LOG_PROFILE: &str = "SNIPX_LOG_PROFILE";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnipxConfig {
    pub store: StoreConfig,
    pub snippets: CreatePolicy,
    pub logging: LoggingConfig,
    pub scopes: ScopesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub profile: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            profile: "development".to_string(),
        }
    }
}

/// Groups snippets may be scoped to
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScopesConfig {
    pub groups: Vec<ScopeRequest>,
}

impl SnipxConfig {
    /// Load configuration
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// [`DEFAULT_CONFIG_FILE`] in the working directory is used when present,
    /// defaults otherwise. Environment overrides apply in both cases.
    ///
    /// # Errors
    ///
    /// - `Io` if an explicit file cannot be read
    /// - `Configuration` if the file is not valid TOML for this schema
    /// - `InvalidInput` if a value is out of range
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Parse and validate one file, without environment overrides
    ///
    /// # Errors
    ///
    /// See [`SnipxConfig::load`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("config_load")
                .with_message(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// # Errors
    ///
    /// See [`SnipxConfig::load`].
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| {
            ExError::new(ExErrorKind::Configuration)
                .with_op("config_parse")
                .with_message(e.to_string())
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup` (the process environment in [`load`])
    ///
    /// [`load`]: SnipxConfig::load
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if an overridden value is invalid.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH).filter(|p| !p.trim().is_empty()) {
            self.store.path = PathBuf::from(path);
        }
        if let Some(profile) = lookup(ENV_LOG_PROFILE).filter(|p| !p.trim().is_empty()) {
            self.logging.profile = profile;
        }
        self.validate()?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `InvalidInput` for an unusable creation policy, an unknown
    /// logging profile, or a group with a blank id.
    pub fn validate(&self) -> Result<()> {
        self.snippets.validate().map_err(config_error)?;
        self.profile()?;
        if let Some(group) = self.scopes.groups.iter().find(|g| g.id.trim().is_empty()) {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("config_validate")
                .with_message(format!("{} group with blank id", group.kind.as_str())));
        }
        Ok(())
    }

    /// Parsed logging profile
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an unknown profile name.
    pub fn profile(&self) -> Result<Profile> {
        self.logging.profile.parse().map_err(config_error)
    }
}

fn config_error(err: snipx_core::SnipError) -> ExError {
    ExError::from(err).with_op("config_validate")
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipx_core::model::ScopeKind;

    #[test]
    fn test_empty_file_is_default() {
        let config = SnipxConfig::from_toml("").unwrap();
        assert_eq!(config, SnipxConfig::default());
        assert_eq!(config.store.path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(config.snippets, CreatePolicy::default());
    }

    #[test]
    fn test_full_file() {
        let config = SnipxConfig::from_toml(
            r#"
            [store]
            path = "/var/lib/snipx/store.db"

            [snippets]
            short_code_length = 6
            max_attempts = 8

            [logging]
            profile = "production"

            [[scopes.groups]]
            kind = "tribe"
            id = "rustaceans"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.path, PathBuf::from("/var/lib/snipx/store.db"));
        assert_eq!(config.snippets.short_code_length, 6);
        assert_eq!(config.snippets.max_attempts, 8);
        assert_eq!(
            config.snippets.max_content_bytes,
            CreatePolicy::default().max_content_bytes
        );
        assert_eq!(config.profile().unwrap(), Profile::Production);
        assert_eq!(
            config.scopes.groups,
            vec![ScopeRequest::new(ScopeKind::Tribe, "rustaceans")]
        );
    }

    #[test]
    fn test_unknown_key_is_configuration_error() {
        let err = SnipxConfig::from_toml("[store]\ndatabase = \"x\"\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Configuration);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = SnipxConfig::from_toml("[snippets]\nmax_attempts = 0\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);

        let err = SnipxConfig::from_toml("[logging]\nprofile = \"loud\"\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = SnipxConfig::default()
            .with_overrides(|key| match key {
                ENV_DB_PATH => Some("/tmp/other.db".to_string()),
                ENV_LOG_PROFILE => Some("test".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.store.path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.profile().unwrap(), Profile::Test);
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let err = SnipxConfig::load(Some(Path::new("/nonexistent/snipx.toml"))).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Io);
    }
}
