use thiserror::Error;

#[derive(Error, Debug)]
pub enum GreeterError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

/// Client-side problems with an incoming request.
///
/// These never escape the handler as failures; they only shape the
/// response envelope and the outcome log line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("the '{name}' parameter does not exist")]
    MissingParameter { name: String },
}

impl RequestError {
    pub fn status_code(&self) -> u16 {
        match self {
            RequestError::MissingParameter { .. } => 400,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Failed to load configuration from {origin}: {error}")]
    LoadFailed {
        origin: String,
        #[source]
        error: Box<dyn std::error::Error + Send + Sync>,
    },
}

#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("JSON serialization failed: {reason}")]
    Json { reason: String },

    #[error("YAML serialization failed: {reason}")]
    Yaml { reason: String },
}

pub type Result<T> = std::result::Result<T, GreeterError>;

impl From<serde_json::Error> for GreeterError {
    fn from(err: serde_json::Error) -> Self {
        GreeterError::Serialization(SerializationError::Json {
            reason: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for GreeterError {
    fn from(err: serde_yaml::Error) -> Self {
        GreeterError::Serialization(SerializationError::Yaml {
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_message_and_status() {
        let err = RequestError::MissingParameter {
            name: "name".to_string(),
        };
        assert_eq!(err.to_string(), "the 'name' parameter does not exist");
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_json_error_converts_to_serialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: GreeterError = json_err.into();
        assert!(matches!(
            err,
            GreeterError::Serialization(SerializationError::Json { .. })
        ));
    }

    #[test]
    fn test_config_error_display() {
        let err = GreeterError::Config(ConfigError::MissingField {
            field: "telemetry.filter".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required field: telemetry.filter"
        );
    }
}
