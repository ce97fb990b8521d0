//! Source identity stamped into every packet.
//!
//! `SourceIdentity` is a plain value; `SharedIdentity` lets configuration
//! change while other threads encode. Setters validate before taking the
//! write lock, and encoders hold the read lock for one packet, so a packet
//! never mixes fields from two identities.

pub mod config;
pub mod error;

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use uuid::Uuid;

use crate::protocols::sacn::error::ValidationError;
use crate::protocols::sacn::layout;

pub use config::IdentityConfig;
pub use error::ConfigError;

/// User-visible source name, 1 to 63 UTF-8 bytes.
///
/// # Examples
/// ```
/// use e131_core::SourceName;
///
/// let name = SourceName::new("console-a")?;
/// assert_eq!(name.as_str(), "console-a");
/// assert_eq!(name.field()[9], 0);
/// assert!(SourceName::new("").is_err());
/// # Ok::<(), e131_core::ValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceName {
    text: String,
    field: [u8; layout::SOURCE_NAME_LEN],
}

impl SourceName {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::SourceNameEmpty);
        }
        if name.len() > layout::SOURCE_NAME_MAX_BYTES {
            return Err(ValidationError::SourceNameTooLong { len: name.len() });
        }
        if name.as_bytes().contains(&0) {
            return Err(ValidationError::SourceNameContainsNul);
        }

        let mut field = [0u8; layout::SOURCE_NAME_LEN];
        field[..name.len()].copy_from_slice(name.as_bytes());
        Ok(Self {
            text: name.to_string(),
            field,
        })
    }

    /// `e131-<pid>`, used when no name is configured.
    pub fn default_for_process() -> Self {
        let text = format!("e131-{}", std::process::id());
        let mut field = [0u8; layout::SOURCE_NAME_LEN];
        field[..text.len()].copy_from_slice(text.as_bytes());
        Self { text, field }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Zero-padded wire field; always NUL-terminated.
    pub fn field(&self) -> &[u8; layout::SOURCE_NAME_LEN] {
        &self.field
    }
}

/// Universe priority, 0 to 200. Higher wins between sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority(u8);

impl Priority {
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|value| *value <= layout::PRIORITY_MAX)
            .map(Priority)
            .ok_or(ValidationError::PriorityOutOfRange { value })
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority(layout::PRIORITY_DEFAULT)
    }
}

/// Component identifier, name and priority of a sending component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIdentity {
    cid: Uuid,
    source_name: SourceName,
    priority: Priority,
}

impl SourceIdentity {
    pub fn new(cid: Uuid, source_name: SourceName, priority: Priority) -> Self {
        Self {
            cid,
            source_name,
            priority,
        }
    }

    pub fn cid(&self) -> Uuid {
        self.cid
    }

    pub fn cid_bytes(&self) -> &[u8; layout::CID_LEN] {
        self.cid.as_bytes()
    }

    pub fn source_name(&self) -> &SourceName {
        &self.source_name
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn set_source_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.source_name = SourceName::new(name)?;
        Ok(())
    }

    pub fn set_priority(&mut self, value: i32) -> Result<(), ValidationError> {
        self.priority = Priority::new(value)?;
        Ok(())
    }
}

impl Default for SourceIdentity {
    /// Random v4 CID, `e131-<pid>` name, priority 100.
    fn default() -> Self {
        Self::new(
            Uuid::new_v4(),
            SourceName::default_for_process(),
            Priority::default(),
        )
    }
}

/// Identity shared between encoders and configuration code.
///
/// # Examples
/// ```
/// use e131_core::{SharedIdentity, SourceIdentity};
///
/// let identity = SharedIdentity::new(SourceIdentity::default());
/// identity.set_priority(150)?;
/// assert!(identity.set_priority(201).is_err());
/// assert_eq!(identity.priority(), 150);
/// # Ok::<(), e131_core::ValidationError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedIdentity {
    inner: Arc<RwLock<SourceIdentity>>,
}

impl SharedIdentity {
    pub fn new(identity: SourceIdentity) -> Self {
        Self {
            inner: Arc::new(RwLock::new(identity)),
        }
    }

    /// Read guard held for the duration of one encode.
    pub fn read(&self) -> RwLockReadGuard<'_, SourceIdentity> {
        self.inner.read()
    }

    pub fn snapshot(&self) -> SourceIdentity {
        self.inner.read().clone()
    }

    pub fn cid(&self) -> Uuid {
        self.inner.read().cid()
    }

    pub fn source_name(&self) -> String {
        self.inner.read().source_name().as_str().to_string()
    }

    pub fn priority(&self) -> u8 {
        self.inner.read().priority().value()
    }

    pub fn set_source_name(&self, name: &str) -> Result<(), ValidationError> {
        let name = SourceName::new(name).inspect_err(|err| {
            tracing::debug!(error = %err, "rejected source name");
        })?;
        tracing::info!(source_name = name.as_str(), "source name updated");
        self.inner.write().source_name = name;
        Ok(())
    }

    pub fn set_priority(&self, value: i32) -> Result<(), ValidationError> {
        let priority = Priority::new(value).inspect_err(|err| {
            tracing::debug!(error = %err, "rejected priority");
        })?;
        tracing::info!(priority = priority.value(), "priority updated");
        self.inner.write().priority = priority;
        Ok(())
    }

    /// Applies several changes under one write lock.
    ///
    /// `change` works on a copy; if it fails the shared identity is left
    /// untouched, so readers see either the old identity or the new one.
    pub fn update<F>(&self, change: F) -> Result<(), ValidationError>
    where
        F: FnOnce(&mut SourceIdentity) -> Result<(), ValidationError>,
    {
        let mut guard = self.inner.write();
        let mut next = guard.clone();
        change(&mut next).inspect_err(|err| {
            tracing::debug!(error = %err, "rejected identity update");
        })?;
        tracing::info!(
            source_name = next.source_name().as_str(),
            priority = next.priority().value(),
            "identity updated"
        );
        *guard = next;
        Ok(())
    }
}
