//! Typed identifiers — the string key naming a greenhouse and the UUID
//! identifying a log entry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable key naming one greenhouse plot (e.g. `solar0`, `solar1`, …).
///
/// The key set is fixed at startup; keys are compared and hashed as plain
/// strings and serialize transparently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GreenhouseKey(String);

impl GreenhouseKey {
    /// Wrap a key string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GreenhouseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for GreenhouseKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Unique identifier for a [`LogEntry`](crate::log::LogEntry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogEntryId(uuid::Uuid);

impl Default for LogEntryId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl LogEntryId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(self) -> uuid::Uuid {
        self.0
    }
}

impl fmt::Display for LogEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for LogEntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_ids_when_called_twice() {
        let a = LogEntryId::new();
        let b = LogEntryId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn should_roundtrip_log_entry_id_through_display_and_from_str() {
        let id = LogEntryId::new();
        let text = id.to_string();
        let parsed: LogEntryId = text.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_serialize_greenhouse_key_as_plain_string() {
        let key = GreenhouseKey::new("solar0");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"solar0\"");
        let parsed: GreenhouseKey = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, key);
    }
}
