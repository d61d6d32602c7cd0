//! Command — an execution request for a document against the target.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::notification::DocumentRef;
use crate::parameters::ParameterDefaults;
use crate::target::TargetId;

/// Execution timeout sent with every command, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u32 = 300;

/// Annotation attached to automatically dispatched commands.
pub const DEFAULT_COMMENT: &str = "Auto-executed due to document update via EventBridge";

/// Tracking identifier returned by the management plane for a submitted command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(String);

impl CommandId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the management plane needs to run a document on the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub target: TargetId,
    pub document: DocumentRef,
    pub parameters: ParameterDefaults,
    pub timeout_secs: u32,
    pub comment: String,
}
