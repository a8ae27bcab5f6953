//! Error types for loading route trees and permission sets.
//!
//! The navigation core itself is total; only the I/O edges fail.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration-side inputs.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML route tree")]
    Yaml(#[from] serde_yml::Error),

    #[error("invalid JSON document")]
    Json(#[from] serde_json::Error),

    #[error("unsupported route file format: {0}")]
    UnsupportedFormat(String),

    #[error("permission endpoint returned code {code}: {message}")]
    PermissionEndpoint { code: i64, message: String },
}

/// Result type alias using NavError.
pub type NavResult<T> = Result<T, NavError>;
