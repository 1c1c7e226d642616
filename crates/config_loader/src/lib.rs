//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate configuration legality
//! - Generate `ServiceSettings`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let settings = ConfigLoader::load_from_path(Path::new("notifier.toml")).unwrap();
//! println!("Workers: {}", settings.dispatch.workers);
//! ```

mod parser;
mod validator;

pub use contracts::ServiceSettings;
pub use parser::ConfigFormat;

use contracts::ContractError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<ServiceSettings, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<ServiceSettings, ContractError> {
        Self::parse_and_validate(content, format)
    }

    /// Re-run validation, e.g. after CLI overrides were applied
    pub fn validate(settings: &ServiceSettings) -> Result<(), ContractError> {
        validator::validate(settings)
    }

    /// Serialize ServiceSettings to TOML string
    pub fn to_toml(settings: &ServiceSettings) -> Result<String, ContractError> {
        toml::to_string_pretty(settings)
            .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize ServiceSettings to JSON string
    pub fn to_json(settings: &ServiceSettings) -> Result<String, ContractError> {
        serde_json::to_string_pretty(settings)
            .map_err(|e| ContractError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Parse and validate configuration content
    fn parse_and_validate(
        content: &str,
        format: ConfigFormat,
    ) -> Result<ServiceSettings, ContractError> {
        let settings = parser::parse(content, format)?;
        validator::validate(&settings)?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL_TOML: &str = r#"
[server]
port = 9090

[dispatch]
workers = 3
retry_delay_ms = 500

[[backends]]
name = "Slack"
backend_type = "slack"
[backends.params]
webhook_url = "https://hooks.slack.com/services/T/B/X"

[[backends]]
name = "Email"
backend_type = "email"
[backends.params]
to = "example@gmail.com"
"#;

    #[test]
    fn test_load_from_str_toml() {
        let result = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let settings = result.unwrap();
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.dispatch.workers, 3);
        assert_eq!(settings.backends.len(), 2);
    }

    #[test]
    fn test_round_trip_toml() {
        let settings = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let serialized = ConfigLoader::to_toml(&settings).unwrap();
        let reloaded = ConfigLoader::load_from_str(&serialized, ConfigFormat::Toml).unwrap();
        assert_eq!(settings.dispatch.retry_delay_ms, reloaded.dispatch.retry_delay_ms);
        assert_eq!(settings.backends[0].name, reloaded.backends[0].name);
    }

    #[test]
    fn test_round_trip_json() {
        let settings = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let json = ConfigLoader::to_json(&settings).unwrap();
        let reloaded = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(settings.server.port, reloaded.server.port);
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let content = r#"
[dispatch]
workers = 0
"#;
        let result = ConfigLoader::load_from_str(content, ConfigFormat::Toml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("workers"));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(MINIMAL_TOML.as_bytes()).unwrap();

        let settings = ConfigLoader::load_from_path(file.path()).unwrap();
        assert_eq!(settings.backends[1].name, "Email");
    }

    #[test]
    fn test_load_from_path_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        let err = ConfigLoader::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported config format"));
    }
}
