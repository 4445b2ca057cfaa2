// Error types for every stage of a sync cycle

use thiserror::Error;

// Startup configuration errors, fatal before any network call is made
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),

    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

// OAuth refresh failures; these abort the current cycle only
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token endpoint unreachable: {0}")]
    Transport(String),

    #[error("Token refresh rejected: {status} - {body}")]
    Rejected { status: u16, body: String },

    #[error("Token response could not be decoded: {0}")]
    InvalidResponse(String),

    #[error("Token response did not contain an access token")]
    MissingToken,
}

// Trading RPC failures
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {status} - {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Transport(String),
}

// XML request serialization and response parsing errors
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("XML parse error: {0}")]
    XmlParseError(String),

    #[error("XML serialization error: {0}")]
    SerializationError(String),

    #[error("Missing root element: expected <{expected}>, found {found}")]
    MissingRootElement { expected: String, found: String },
}

// Anything that ends a poll cycle early
#[derive(Error, Debug)]
pub enum CycleError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Request(#[from] ProcessingError),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Transport(err.to_string())
    }
}
