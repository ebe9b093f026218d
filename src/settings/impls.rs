// Standard library
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::{env, fs};

// 3rd party crates
use config::{Config, ConfigError, File};
use tokio::sync::RwLock;
use tracing::{error, info};

// Project imports
use crate::providers::dynect::constants::PROVIDER_NAME as DYN_PROVIDER;
use crate::providers::ns1::constants::PROVIDER_NAME as NS1_PROVIDER;

// Current module imports
use super::constants::DEFAULT_CONFIG;
use super::errors::ValidationError;
use super::types::{ConfigManager, Settings, ValidatedSettings};

impl Settings {
    pub fn get_log_level(&self) -> String {
        self.log.level.to_lowercase()
    }

    pub fn get_check_interval(&self) -> u64 {
        self.check_interval
    }

    /// Whether the named provider appears in the enabled provider list.
    pub fn provider_enabled(&self, provider: &str) -> bool {
        self.providers.iter().any(|p| p == provider)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        // Validate log level
        match self.log.level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => return Err(ValidationError::InvalidLogLevel(self.log.level.clone())),
        }

        // Validate check interval
        if self.check_interval == 0 {
            return Err(ValidationError::InvalidCheckInterval(self.check_interval));
        }

        // Every enabled provider must be known and have its config section.
        // Credential contents are checked at collection time, where a missing
        // value only aborts that provider's cycle.
        for provider in &self.providers {
            match provider.as_str() {
                p if p == DYN_PROVIDER => {
                    if self.dynect.is_none() {
                        return Err(ValidationError::MissingProviderConfig(provider.clone()));
                    }
                }
                p if p == NS1_PROVIDER => {
                    if self.ns1.is_none() {
                        return Err(ValidationError::MissingProviderConfig(provider.clone()));
                    }
                }
                _ => return Err(ValidationError::UnknownProvider(provider.clone())),
            }
        }

        // Validate tag format
        if let Some(format) = &self.tag_format {
            if format != "datadog" {
                return Err(ValidationError::InvalidTagFormat(format.clone()));
            }
        }

        Ok(())
    }
}

impl ConfigManager {
    /// Creates a new `ConfigManager` instance by loading and validating the
    /// configuration. Any failure here is fatal at startup.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let config_path: PathBuf = match config_path {
            Some(path) => path,
            None => {
                let path = Self::get_config_path()?;
                Self::ensure_config_file_exists(&path)?;
                path
            }
        };

        let settings: Settings = Self::load_settings(&config_path)?;

        let validated_settings = ValidatedSettings::new(settings).map_err(|e| {
            error!("Configuration validation failed: {}", e);
            e
        })?;

        Ok(ConfigManager {
            settings: Arc::new(RwLock::new(validated_settings.into_inner())),
            _config_path: config_path,
        })
    }

    /// Determines the configuration file path when none is given explicitly.
    fn get_config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = env::var("DNSMETRICS_CONFIG_PATH") {
            Ok(PathBuf::from(path))
        } else if let Some(config_dir) = dirs::config_dir() {
            Ok(config_dir.join("dnsmetrics").join("config.toml"))
        } else {
            let msg: &str = "Could not determine the configuration directory";
            error!("{}", msg);
            Err(ConfigError::Message(msg.into()))
        }
    }

    /// Ensures that the configuration file exists, creating it if necessary.
    fn ensure_config_file_exists(config_path: &Path) -> Result<(), ConfigError> {
        if !config_path.exists() {
            if let Some(parent_dir) = config_path.parent() {
                fs::create_dir_all(parent_dir).map_err(|e| {
                    let msg: String = format!("Failed to create configuration directory: {}", e);
                    error!("{}", msg);
                    ConfigError::Message(msg)
                })?;
            }
            fs::write(config_path, DEFAULT_CONFIG).map_err(|e| {
                let msg: String = format!("Failed to create default configuration file: {}", e);
                error!("{}", msg);
                ConfigError::Message(msg)
            })?;
            info!("Default configuration file created at: {:?}", config_path);
        }
        Ok(())
    }

    /// Loads the settings from the configuration file.
    fn load_settings(config_path: &Path) -> Result<Settings, ConfigError> {
        let config_file: &str = config_path.to_str().ok_or_else(|| {
            let msg: &str = "Configuration file path contains invalid UTF-8 characters";
            error!("{}", msg);
            ConfigError::Message(msg.into())
        })?;

        let settings: Config = Config::builder()
            .add_source(File::with_name(config_file))
            .build()?;

        settings.try_deserialize()
    }

    /// Provides a read-locked reference to the current settings.
    pub async fn get_settings(&self) -> tokio::sync::RwLockReadGuard<'_, Settings> {
        self.settings.read().await
    }

    pub async fn get_log_level(&self) -> String {
        self.settings.read().await.get_log_level()
    }

    pub async fn get_check_interval(&self) -> u64 {
        self.settings.read().await.get_check_interval()
    }
}

impl ValidatedSettings {
    pub fn new(settings: Settings) -> Result<Self, ValidationError> {
        settings.validate()?;
        Ok(ValidatedSettings(settings))
    }

    pub fn into_inner(self) -> Settings {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(document: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(document, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn defaults_apply_to_an_empty_document() {
        let settings = parse("");
        assert!(settings.providers.is_empty());
        assert_eq!(settings.check_interval, 300);
        assert_eq!(settings.statsd_address, "localhost:8125");
        assert_eq!(settings.get_log_level(), "info");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn full_document_parses_and_validates() {
        let settings = parse(
            r#"
            providers = ["dyn", "ns1"]
            check_interval = 60
            statsd_address = "statsd.internal:8125"
            tag_format = "datadog"

            [log]
            level = "debug"

            [dyn]
            customer = "acme"
            username = "ops"
            password = "hunter2"

            [ns1]
            api_key = "abc123"
            "#,
        );

        assert!(settings.validate().is_ok());
        assert!(settings.provider_enabled("dyn"));
        assert!(settings.provider_enabled("ns1"));
        assert!(!settings.provider_enabled("route53"));
        assert_eq!(settings.check_interval, 60);
        assert_eq!(settings.dynect.as_ref().unwrap().customer, "acme");
        assert_eq!(settings.ns1.as_ref().unwrap().api_key, "abc123");
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let settings = parse(r#"providers = ["route53"]"#);
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::UnknownProvider(_))
        ));
    }

    #[test]
    fn enabled_provider_without_section_is_rejected() {
        let settings = parse(r#"providers = ["ns1"]"#);
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::MissingProviderConfig(_))
        ));
    }

    #[test]
    fn zero_check_interval_is_rejected() {
        let settings = parse("check_interval = 0");
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::InvalidCheckInterval(0))
        ));
    }

    #[test]
    fn unsupported_tag_format_is_rejected() {
        let settings = parse(r#"tag_format = "influx""#);
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::InvalidTagFormat(_))
        ));
    }
}
