use thiserror::Error;

pub type IntegrationResult<T> = Result<T, IntegrationError>;

#[derive(Error, Debug)]
pub enum IntegrationError {
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("Destination config must be a JSON object, got {0}")]
    InvalidConfig(&'static str),

    #[error("Unknown log level: {0}")]
    UnknownLogLevel(String),

    #[error("Destination not found in server config: {0}")]
    DestinationNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
