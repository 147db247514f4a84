//! CLI configuration module.
//!
//! Settings are layered: built-in defaults, then an optional
//! `gst-billing.toml` in the working directory, then `GST_BILLING_*`
//! environment variables.
//!
//! ## Example
//! ```text
//! GST_BILLING_PRETTY_JSON=false
//! GST_BILLING_AUTO_ROUND_OFF=true
//! GST_BILLING_MAX_ROUND_OFF=2
//! ```

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, Environment, File, FileFormat};
use gst_core::{DEFAULT_UNIT, UNIT_OPTIONS};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Base name of the optional settings file.
pub const CONFIG_FILE: &str = "gst-billing";

/// Prefix of the environment overrides.
pub const ENV_PREFIX: &str = "GST_BILLING";

/// gst-billing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Default tracing filter; `RUST_LOG` wins when set
    pub log_filter: String,

    /// Indent the request body written to stdout
    pub pretty_json: bool,

    /// Fill a blank round-off with the whole-rupee suggestion
    pub auto_round_off: bool,

    /// Largest round-off accepted without a warning, in rupees
    pub max_round_off: Decimal,

    /// Unit applied to rows whose unit is blank
    pub default_unit: String,

    /// Refuse to print a request while there are warnings
    pub strict: bool,
}

impl CliConfig {
    /// Load configuration from the settings file and environment.
    pub fn load() -> Result<Self, ConfigError> {
        let config = defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize::<CliConfig>()?;

        config.validate()
    }

    /// Load configuration from TOML text over the defaults.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let config = defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<CliConfig>()?;

        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.max_round_off.is_sign_negative() {
            return Err(ConfigError::InvalidValue {
                key: "max_round_off",
                reason: format!("must not be negative, got {}", self.max_round_off),
            });
        }

        if !UNIT_OPTIONS.contains(&self.default_unit.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "default_unit",
                reason: format!("'{}' is not a known unit", self.default_unit),
            });
        }

        Ok(self)
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            log_filter: "info,gst_core=debug".to_string(),
            pretty_json: true,
            auto_round_off: false,
            max_round_off: Decimal::ONE,
            default_unit: DEFAULT_UNIT.to_string(),
            strict: false,
        }
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let d = CliConfig::default();

    Ok(Config::builder()
        .set_default("log_filter", d.log_filter)?
        .set_default("pretty_json", d.pretty_json)?
        .set_default("auto_round_off", d.auto_round_off)?
        .set_default("max_round_off", d.max_round_off.to_string())?
        .set_default("default_unit", d.default_unit)?
        .set_default("strict", d.strict)?)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_toml("").unwrap();
        assert_eq!(config.log_filter, "info,gst_core=debug");
        assert!(config.pretty_json);
        assert!(!config.auto_round_off);
        assert_eq!(config.max_round_off, dec!(1));
        assert_eq!(config.default_unit, "NONE");
        assert!(!config.strict);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = CliConfig::from_toml(
            r#"
            pretty_json = false
            auto_round_off = true
            max_round_off = "2.50"
            default_unit = "BOX (Box)"
            "#,
        )
        .unwrap();

        assert!(!config.pretty_json);
        assert!(config.auto_round_off);
        assert_eq!(config.max_round_off, dec!(2.50));
        assert_eq!(config.default_unit, "BOX (Box)");
        assert_eq!(config.log_filter, "info,gst_core=debug");
    }

    #[test]
    fn test_rejects_unknown_unit() {
        let err = CliConfig::from_toml(r#"default_unit = "LITRES""#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "default_unit",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_round_off_limit() {
        let err = CliConfig::from_toml(r#"max_round_off = "-1""#).unwrap_err();
        assert!(err.to_string().contains("max_round_off"));
    }
}
