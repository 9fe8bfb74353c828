use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Data file is corrupt: {0}")]
    #[diagnostic(code(dallyeok::data_corrupt))]
    DataCorrupt(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(dallyeok::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(dallyeok::config))]
    Config(String),

    #[error("Event store error: {0}")]
    #[diagnostic(code(dallyeok::event_store))]
    Store(String),

    #[error("Component error: {0}")]
    #[diagnostic(code(dallyeok::component))]
    Component(String),

    #[error("Notification error: {0}")]
    #[diagnostic(code(dallyeok::notification))]
    Notification(String),

    #[error(transparent)]
    #[diagnostic(code(dallyeok::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(dallyeok::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(dallyeok::other))]
    Other(String),
}

// Implement From for TOML deserialization errors (component toggles file)
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type CalResult<T> = Result<T, Error>;

/// Helper to create environment errors
#[allow(dead_code)]
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create data corruption errors
#[allow(dead_code)]
pub fn data_corrupt_error(message: &str) -> Error {
    Error::DataCorrupt(message.to_string())
}

/// Helper to create event store errors
pub fn store_error(message: &str) -> Error {
    Error::Store(message.to_string())
}

/// Helper to create component errors
#[allow(dead_code)]
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}
