//! Target — the single managed host commands are dispatched to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

/// Identifier of the managed instance (e.g. `i-0123456789abcdef0`).
///
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    /// Resolve the configured target, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::TargetNotConfigured`] when the value is
    /// unset or blank.
    pub fn resolve(configured: Option<&str>) -> Result<Self, DispatchError> {
        match configured.map(str::trim) {
            Some(id) if !id.is_empty() => Ok(Self(id.to_string())),
            _ => Err(DispatchError::TargetNotConfigured),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registration details the management plane reports for a target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetInfo {
    pub instance_id: String,
    /// Agent ping status (e.g. `Online`, `ConnectionLost`), when reported.
    pub ping_status: Option<String>,
    pub platform_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_resolve_configured_target() {
        let id = TargetId::resolve(Some("i-0abc")).unwrap();
        assert_eq!(id.as_str(), "i-0abc");
        assert_eq!(id.to_string(), "i-0abc");
    }

    #[test]
    fn should_trim_whitespace() {
        let id = TargetId::resolve(Some("  i-0abc\n")).unwrap();
        assert_eq!(id.as_str(), "i-0abc");
    }

    #[test]
    fn should_fail_when_unset() {
        assert_eq!(
            TargetId::resolve(None),
            Err(DispatchError::TargetNotConfigured)
        );
    }

    #[test]
    fn should_fail_when_blank() {
        assert_eq!(
            TargetId::resolve(Some("   ")),
            Err(DispatchError::TargetNotConfigured)
        );
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let id = TargetId::resolve(Some("i-0abc")).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"i-0abc\"");
    }
}
