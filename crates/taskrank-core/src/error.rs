//! Core error types for taskrank-core.
//!
//! Every failure is recovered at the boundary of the user action that
//! triggered it; none of these errors is fatal to the session.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for taskrank-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Manual task entry rejected
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Bulk import text could not be parsed
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Bulk import parsed but was not a list of tasks
    #[error("{0}")]
    Shape(#[from] ShapeError),

    /// Remote scoring call failed
    #[error("{0}")]
    Analysis(#[from] AnalysisError),

    /// Analysis requested with nothing in the store
    #[error("Add at least one task before analyzing.")]
    EmptyInput,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Manual-entry validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required form field was blank after trimming
    #[error("{} is required.", capitalize(.field))]
    MissingField { field: &'static str },

    /// Value outside the range the scoring service accepts
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Import text was empty or not JSON at all.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Please paste a JSON array first.")]
    EmptyInput,

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Import text was JSON, but not the shape a task list needs.
///
/// `found` names the JSON type that was supplied instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Invalid JSON: JSON should be an array of tasks.")]
    NotAnArray { found: &'static str },
}

/// Failures talking to the scoring service.
///
/// `Display` is the short user-facing reason; callers prefix it with the
/// action that failed.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Non-success status, with the server's `detail` when it sent one
    #[error("{}", status_message(.status, .detail))]
    Status { status: u16, detail: Option<String> },

    /// Connection refused, reset, DNS failure and the like
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Success status but the body was not the expected shape
    #[error("unexpected response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// Configured base address is not a URL
    #[error("invalid API base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// No home directory to put the config under
    #[error("could not determine the configuration directory")]
    NoConfigDir,
}

fn status_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) if !detail.is_empty() => detail.clone(),
        _ => format!("Backend returned status {status}"),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
