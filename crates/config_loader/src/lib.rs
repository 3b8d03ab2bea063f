//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Parse the delimited `host:port` endpoint list
//! - Validate configuration legality before any resource is touched
//! - Generate `BridgeBlueprint`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let blueprint = ConfigLoader::load_from_path(Path::new("bridge.toml")).unwrap();
//! println!("Sampling {} channels", blueprint.channel_count);
//! ```

mod endpoints;
mod parser;
mod validator;

pub use contracts::BridgeBlueprint;
pub use endpoints::{parse_endpoint_list, parse_pair, parse_port, ENDPOINT_LIST_USAGE};
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
    pub fn load_from_path(path: &Path) -> Result<BridgeBlueprint, ContractError> {
        let blueprint = Self::read_from_path(path)?;
        validator::validate(&blueprint)?;
        Ok(blueprint)
    }

    /// Parse a configuration file without validating it
    ///
    /// Used when command-line overrides are applied before validation.
    pub fn read_from_path(path: &Path) -> Result<BridgeBlueprint, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        parser::parse(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<BridgeBlueprint, ContractError> {
        let blueprint = parser::parse(content, format)?;
        validator::validate(&blueprint)?;
        Ok(blueprint)
    }

    /// Validate an already assembled blueprint
    pub fn validate(blueprint: &BridgeBlueprint) -> Result<(), ContractError> {
        validator::validate(blueprint)
    }

    /// Serialize BridgeBlueprint to TOML string
    pub fn to_toml(blueprint: &BridgeBlueprint) -> Result<String, ContractError> {
        toml::to_string_pretty(blueprint)
            .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize BridgeBlueprint to JSON string
    pub fn to_json(blueprint: &BridgeBlueprint) -> Result<String, ContractError> {
        serde_json::to_string_pretty(blueprint)
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
}
