use std::path::PathBuf;

use thiserror::Error;

use crate::protocols::sacn::error::ValidationError;

/// Errors returned while loading an identity configuration file.
///
/// # Examples
/// ```
/// use e131_core::{ConfigError, IdentityConfig};
///
/// let err = IdentityConfig::from_json_str("{").unwrap_err();
/// assert!(matches!(err, ConfigError::Json(_)));
/// ```
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid identity config: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
