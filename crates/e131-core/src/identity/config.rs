use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ConfigError;
use super::{Priority, SourceIdentity, SourceName};
use crate::protocols::sacn::error::ValidationError;

/// On-disk identity configuration. Missing fields fall back to defaults.
///
/// # Examples
/// ```
/// use e131_core::IdentityConfig;
///
/// let config = IdentityConfig::from_json_str(
///     r#"{"source_name": "rig", "priority": 120}"#,
/// )?;
/// let identity = config.into_identity()?;
/// assert_eq!(identity.source_name().as_str(), "rig");
/// assert_eq!(identity.priority().value(), 120);
/// # Ok::<(), e131_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Persist this to keep the CID stable across restarts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cid: Option<Uuid>,
}

impl IdentityConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Validates every field and fills in defaults for the missing ones.
    pub fn into_identity(self) -> Result<SourceIdentity, ValidationError> {
        let source_name = match self.source_name.as_deref() {
            Some(name) => SourceName::new(name)?,
            None => SourceName::default_for_process(),
        };
        let priority = match self.priority {
            Some(value) => Priority::new(value)?,
            None => Priority::default(),
        };
        let cid = self.cid.unwrap_or_else(Uuid::new_v4);
        Ok(SourceIdentity::new(cid, source_name, priority))
    }
}

/// Parses a CID in any textual UUID form.
pub fn parse_cid(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value).map_err(|_| ValidationError::InvalidCid {
        value: value.to_string(),
    })
}
