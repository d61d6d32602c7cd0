//! Common error types used across the workspace.
//!
//! Every failure of a dispatch is a [`DispatchError`]. Each variant carries a
//! stable machine-readable [`kind`](DispatchError::kind) and a human-readable
//! message, and knows which [`OutcomeStatus`] it is reported as.

use std::fmt;

use crate::outcome::OutcomeStatus;

/// A remote management-plane operation, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOperation {
    /// Target availability check.
    DescribeTargets,
    /// Document parameter schema lookup.
    DescribeDocument,
    /// Execution request submission.
    SendCommand,
}

impl RemoteOperation {
    /// Stable snake-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DescribeTargets => "describe_targets",
            Self::DescribeDocument => "describe_document",
            Self::SendCommand => "send_command",
        }
    }
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed call to the remote management plane.
///
/// The message is the underlying transport, permission or service fault,
/// kept verbatim for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation} failed: {message}")]
pub struct RemoteError {
    pub operation: RemoteOperation,
    pub message: String,
}

impl RemoteError {
    #[must_use]
    pub fn new(operation: RemoteOperation, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }

    /// Message reported to the invoker when this failure ends a dispatch.
    #[must_use]
    pub fn outcome_message(&self) -> String {
        let context = match self.operation {
            RemoteOperation::DescribeTargets => "Error checking instance",
            RemoteOperation::DescribeDocument => "Error describing document",
            RemoteOperation::SendCommand => "Error executing command",
        };
        format!("{context}: {}", self.message)
    }
}

/// Why a dispatch did not happen.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// The notification carries no (or an empty) document name.
    #[error("No document name provided")]
    MissingDocumentName,

    /// The notification envelope has the wrong shape.
    #[error("Unexpected error: malformed notification: {0}")]
    MalformedNotification(String),

    /// No target instance is configured for this process.
    #[error("Target instance not configured")]
    TargetNotConfigured,

    /// The management plane does not know the configured target.
    #[error("Instance {target} not available for SSM")]
    TargetUnavailable { target: String },

    /// A remote call failed.
    #[error("{}", .0.outcome_message())]
    Remote(#[from] RemoteError),

    /// The dispatch chain failed in a way none of the above describes.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl DispatchError {
    /// Stable, machine-readable error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingDocumentName => "missing_document_name",
            Self::MalformedNotification(_) => "malformed_notification",
            Self::TargetNotConfigured => "target_not_configured",
            Self::TargetUnavailable { .. } => "target_unavailable",
            Self::Remote(err) => match err.operation {
                RemoteOperation::DescribeTargets => "target_check_failed",
                RemoteOperation::DescribeDocument => "document_lookup_failed",
                RemoteOperation::SendCommand => "send_command_failed",
            },
            Self::Unexpected(_) => "unexpected",
        }
    }

    /// The outcome classification this error is reported under.
    #[must_use]
    pub fn status(&self) -> OutcomeStatus {
        match self {
            Self::MissingDocumentName | Self::TargetNotConfigured => {
                OutcomeStatus::ValidationError
            }
            Self::TargetUnavailable { .. } => OutcomeStatus::TargetUnavailable,
            Self::MalformedNotification(_) | Self::Remote(_) | Self::Unexpected(_) => {
                OutcomeStatus::DispatchError
            }
        }
    }

    /// HTTP-style status code returned to the invoker.
    ///
    /// A missing target is an operator error (500), while an unknown target
    /// is a data error (400).
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingDocumentName | Self::TargetUnavailable { .. } => 400,
            Self::MalformedNotification(_)
            | Self::TargetNotConfigured
            | Self::Remote(_)
            | Self::Unexpected(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_missing_document_name_to_client_error() {
        let err = DispatchError::MissingDocumentName;
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.status(), OutcomeStatus::ValidationError);
        assert_eq!(err.to_string(), "No document name provided");
    }

    #[test]
    fn should_map_missing_target_to_server_error() {
        let err = DispatchError::TargetNotConfigured;
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.status(), OutcomeStatus::ValidationError);
        assert_eq!(err.kind(), "target_not_configured");
    }

    #[test]
    fn should_map_unavailable_target_to_client_error() {
        let err = DispatchError::TargetUnavailable {
            target: "i-abc".to_string(),
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.status(), OutcomeStatus::TargetUnavailable);
        assert!(err.to_string().contains("i-abc"));
    }

    #[test]
    fn should_keep_remote_message_verbatim() {
        let err: DispatchError =
            RemoteError::new(RemoteOperation::SendCommand, "AccessDenied: nope").into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.status(), OutcomeStatus::DispatchError);
        assert_eq!(err.kind(), "send_command_failed");
        assert_eq!(err.to_string(), "Error executing command: AccessDenied: nope");
    }

    #[test]
    fn should_distinguish_target_check_failure_from_absence() {
        let failed: DispatchError =
            RemoteError::new(RemoteOperation::DescribeTargets, "timeout").into();
        let absent = DispatchError::TargetUnavailable {
            target: "i-abc".to_string(),
        };
        assert_ne!(failed.kind(), absent.kind());
        assert_ne!(failed.status_code(), absent.status_code());
        assert_eq!(failed.to_string(), "Error checking instance: timeout");
    }

    #[test]
    fn should_display_remote_error_with_operation() {
        let err = RemoteError::new(RemoteOperation::DescribeDocument, "not found");
        assert_eq!(err.to_string(), "describe_document failed: not found");
    }
}
