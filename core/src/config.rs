use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::errors::{ConfigError, GreeterError, Result};

pub const CONFIG_ENV_VAR: &str = "GREETER_CONFIG";

/// Runner-side settings. The handler itself reads none of this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GreeterConfig {
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset.
    pub filter: String,
    pub ansi: bool,
    pub with_time: bool,
    pub with_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            ansi: false,
            with_time: false,
            with_target: false,
        }
    }
}

pub fn load_config(config_path: Option<&str>) -> Result<GreeterConfig> {
    let config = match config_path {
        Some(path) => GreeterConfig::from_file(path)?,
        None => GreeterConfig::from_env()?,
    };
    config.validate()?;
    Ok(config)
}

impl GreeterConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            origin: path.to_string(),
            error: Box::new(e),
        })?;
        Self::from_yaml(&content)
    }

    /// Reads YAML from `GREETER_CONFIG`, falling back to defaults when unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(content) => Self::from_yaml(&content),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(ConfigError::LoadFailed {
                origin: CONFIG_ENV_VAR.to_string(),
                error: Box::new(e),
            }
            .into()),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: GreeterConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let filter = self.telemetry.filter.trim();
        if filter.is_empty() {
            return Err(GreeterError::Config(ConfigError::MissingField {
                field: "telemetry.filter".to_string(),
            }));
        }
        EnvFilter::try_new(filter).map_err(|e| ConfigError::Invalid {
            message: format!("telemetry.filter '{}' does not parse: {}", filter, e),
        })?;
        Ok(())
    }
}
