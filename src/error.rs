use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CajaError {
    #[error("Config directory not found at {0}. Run 'caja init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Invalid payment amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },

    #[error("Invoice page metadata '{0}' is missing or unreadable")]
    MissingMetadata(&'static str),

    #[error("Could not reach the backend. Check the connection. ({0})")]
    Transport(#[from] ureq::Error),

    #[error("Backend returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Unexpected response from the backend: {0}")]
    MalformedResponse(String),

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CajaError>;
