use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration from environment: {0}")]
    EnvError(#[from] envy::Error),

    #[error("Failed to read env file '{path}': {message}")]
    EnvFileError { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    ValidateError(String),
}
