use std::{error::Error as StdError, fmt};
use reqwest::StatusCode;

/// Errors returned by the service client and the config layer
#[derive(Debug)]
pub enum ClientError {
    /// HTTP transport error
    Reqwest(reqwest::Error),
    /// The service answered with a non-success status
    Status { status: StatusCode, body: String },
    /// JSON (de)serialization error
    Json(serde_json::Error),
    /// TOML parsing error
    Toml(toml::de::Error),
    /// TOML serialization error
    TomlWrite(toml::ser::Error),
    /// I/O error (reading files, writing images, config)
    Io(std::io::Error),
    /// A success status whose body reports a failure or lacks the expected data
    Service(String),
    /// The configured API revision has no endpoint for this operation
    Unsupported(&'static str),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Reqwest(e) => write!(f, "HTTP error: {}", e),
            ClientError::Status { status, body } => {
                if body.is_empty() {
                    write!(f, "Service returned {}", status)
                } else {
                    write!(f, "Service returned {}: {}", status, body)
                }
            }
            ClientError::Json(e) => write!(f, "JSON error: {}", e),
            ClientError::Toml(e) => write!(f, "TOML error: {}", e),
            ClientError::TomlWrite(e) => write!(f, "TOML write error: {}", e),
            ClientError::Io(e) => write!(f, "I/O error: {}", e),
            ClientError::Service(msg) => write!(f, "Service error: {}", msg),
            ClientError::Unsupported(op) => write!(f, "{} is not offered by this API revision", op),
        }
    }
}

impl StdError for ClientError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ClientError::Reqwest(e) => Some(e),
            ClientError::Json(e) => Some(e),
            ClientError::Toml(e) => Some(e),
            ClientError::TomlWrite(e) => Some(e),
            ClientError::Io(e) => Some(e),
            ClientError::Status { .. } | ClientError::Service(_) | ClientError::Unsupported(_) => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Reqwest(e)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Json(e)
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(e: toml::de::Error) -> Self {
        ClientError::Toml(e)
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(e: toml::ser::Error) -> Self {
        ClientError::TomlWrite(e)
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Io(e)
    }
}

pub type ClipboardError = Box<dyn std::error::Error>;
