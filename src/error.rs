use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration document errors
///
/// Always fatal to the current run; never retried automatically.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Region name not present in the region registry
    #[error("unknown region: {0}")]
    UnknownRegion(String),
    /// Profile name not present in the profile registry
    #[error("unknown profile: {0}")]
    UnknownProfile(String),
    /// A field holds an out-of-range value
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: String, value: f64 },
    /// Configuration document could not be read from disk
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Configuration document is not valid TOML or is missing required fields
    #[error("malformed configuration document: {0}")]
    Malformed(#[from] toml::de::Error),
}

/// Usage document errors
///
/// Fatal to the whole batch: a single bad record invalidates the run so a
/// Summary is never silently partial.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Usage document is structurally invalid
    ///
    /// `message` already carries the line/column rendered by the JSON
    /// parser; the numeric fields are kept for structured consumers.
    #[error("malformed usage document: {message}")]
    Malformed {
        line: usize,
        column: usize,
        message: String,
    },
    /// A record names a profile absent from configuration
    #[error("usage document references unknown profile: {0}")]
    UnknownProfile(String),
    /// A per-entry token override is negative or not finite
    #[error("usage entry {entry}: invalid {field} override: {value}")]
    InvalidOverride {
        entry: usize,
        field: &'static str,
        value: f64,
    },
}

/// Umbrella error for adapters that need a single taxonomy to map to
/// transport-level failures
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        // Bad input and unknown configuration must be distinguishable to
        // clients; everything else is a server-side configuration fault.
        let status = match &self {
            Self::Parse(_) => StatusCode::BAD_REQUEST,
            Self::Config(ConfigError::UnknownRegion(_))
            | Self::Config(ConfigError::UnknownProfile(_)) => StatusCode::NOT_FOUND,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "type": error_type_name(&self),
            }
        }));

        (status, body).into_response()
    }
}

fn error_type_name(error: &EngineError) -> &'static str {
    match error {
        EngineError::Parse(ParseError::Malformed { .. }) => "malformed_document",
        EngineError::Parse(ParseError::UnknownProfile(_)) => "unknown_profile",
        EngineError::Parse(ParseError::InvalidOverride { .. }) => "invalid_override",
        EngineError::Config(ConfigError::UnknownRegion(_)) => "unknown_region",
        EngineError::Config(ConfigError::UnknownProfile(_)) => "unknown_profile",
        EngineError::Config(ConfigError::InvalidValue { .. }) => "invalid_config_value",
        EngineError::Config(ConfigError::Io { .. }) => "config_io_error",
        EngineError::Config(ConfigError::Malformed(_)) => "malformed_config",
    }
}
