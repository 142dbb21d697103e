//! Error types for FindU

use thiserror::Error;

/// Result type alias using FindU's Error
pub type Result<T> = std::result::Result<T, Error>;

/// FindU error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Model error: {message}")]
    ModelError { message: String },

    #[error("Store error: {message}")]
    StoreError { message: String },

    #[error("Search error: {message}")]
    SearchError { message: String },

    #[error("Unknown campus: {name}")]
    UnknownCampus { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}
