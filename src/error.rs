//! Error types for Trialboard
//!
//! `DecodeError` covers metric payload decoding; `AppError` covers everything
//! the application surface can hit (configuration, I/O, manager calls).

use thiserror::Error;

/// Which pass of the two-pass metric decode failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeLayer {
    /// The outer JSON string literal
    Outer,
    /// The JSON document carried inside the outer string
    Inner,
}

impl DecodeLayer {
    /// Convert to string representation for logging and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Outer => "outer",
            Self::Inner => "inner",
        }
    }
}

impl std::fmt::Display for DecodeLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to decode a metric record's `data` payload
///
/// Unsupported payload shapes are not errors; see
/// [`NormalizedMetric::Unsupported`](crate::metrics::NormalizedMetric::Unsupported).
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Malformed {layer} metric payload: {source}")]
    Json {
        layer: DecodeLayer,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed {layer} metric payload (NaN/Infinity decoder): {source}")]
    Permissive {
        layer: DecodeLayer,
        #[source]
        source: json5::Error,
    },

    #[error("Metric payload is not double-encoded: outer layer is {found}, expected a string")]
    NotDoubleEncoded { found: &'static str },
}

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file {path}: {source}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration in {path}: {reason}")]
    ConfigValidationFailed { path: String, reason: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Failed to read {path}: {source}")]
    InputRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input in {path}: {source}")]
    InputParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API {url} {reason}")]
    Api { url: String, reason: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;
