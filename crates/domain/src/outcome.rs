//! Dispatch outcome — the classified result of handling one notification,
//! and the response envelope returned to the invoker.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::command::CommandId;
use crate::error::DispatchError;
use crate::notification::DocumentRef;
use crate::target::TargetId;

/// Terminal classification of a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Ignored,
    ValidationError,
    TargetUnavailable,
    Dispatched,
    DispatchError,
}

impl OutcomeStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ignored => "ignored",
            Self::ValidationError => "validation_error",
            Self::TargetUnavailable => "target_unavailable",
            Self::Dispatched => "dispatched",
            Self::DispatchError => "dispatch_error",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of handling one change notification.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The document is outside the prefix of interest.
    Ignored { document_name: String },
    /// The command was accepted by the management plane.
    Dispatched {
        command_id: CommandId,
        target: TargetId,
        document: DocumentRef,
    },
    /// The chain stopped before or during submission.
    Failed(DispatchError),
}

impl From<DispatchError> for DispatchOutcome {
    fn from(err: DispatchError) -> Self {
        Self::Failed(err)
    }
}

impl DispatchOutcome {
    #[must_use]
    pub fn status(&self) -> OutcomeStatus {
        match self {
            Self::Ignored { .. } => OutcomeStatus::Ignored,
            Self::Dispatched { .. } => OutcomeStatus::Dispatched,
            Self::Failed(err) => err.status(),
        }
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Ignored { .. } | Self::Dispatched { .. } => 200,
            Self::Failed(err) => err.status_code(),
        }
    }

    /// JSON body describing this outcome.
    #[must_use]
    pub fn body(&self) -> Value {
        let status = self.status().as_str();
        match self {
            Self::Ignored { document_name } => json!({
                "status": status,
                "message": "Document ignored - name does not match the dispatch prefix",
                "document_name": document_name,
            }),
            Self::Dispatched {
                command_id,
                target,
                document,
            } => json!({
                "status": status,
                "message": "SSM command sent successfully",
                "command_id": command_id,
                "instance_id": target,
                "document_name": document.name,
                "document_version": document.version,
            }),
            Self::Failed(err) => json!({
                "status": status,
                "kind": err.kind(),
                "error": err.to_string(),
            }),
        }
    }

    /// Render the response envelope returned to the invoker.
    #[must_use]
    pub fn into_response(self) -> HandlerResponse {
        HandlerResponse {
            status_code: self.status_code(),
            body: self.body().to_string(),
        }
    }
}

/// Response envelope: an HTTP-style status code and a JSON-encoded body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RemoteError, RemoteOperation};

    fn document() -> DocumentRef {
        DocumentRef {
            name: "OpenVPN-Setup".to_string(),
            version: "$LATEST".to_string(),
        }
    }

    #[test]
    fn should_render_dispatched_body() {
        let outcome = DispatchOutcome::Dispatched {
            command_id: CommandId::new("cmd-123"),
            target: TargetId::resolve(Some("i-0abc")).unwrap(),
            document: document(),
        };
        assert_eq!(outcome.status_code(), 200);
        let body = outcome.body();
        assert_eq!(body["status"], "dispatched");
        assert_eq!(body["command_id"], "cmd-123");
        assert_eq!(body["instance_id"], "i-0abc");
        assert_eq!(body["document_name"], "OpenVPN-Setup");
        assert_eq!(body["document_version"], "$LATEST");
    }

    #[test]
    fn should_render_ignored_as_success() {
        let outcome = DispatchOutcome::Ignored {
            document_name: "AWS-RunShellScript".to_string(),
        };
        assert_eq!(outcome.status(), OutcomeStatus::Ignored);
        assert_eq!(outcome.status_code(), 200);
        assert_eq!(outcome.body()["document_name"], "AWS-RunShellScript");
    }

    #[test]
    fn should_render_error_kind_and_detail() {
        let outcome: DispatchOutcome =
            DispatchError::from(RemoteError::new(RemoteOperation::SendCommand, "throttled"))
                .into();
        assert_eq!(outcome.status_code(), 500);
        let body = outcome.body();
        assert_eq!(body["status"], "dispatch_error");
        assert_eq!(body["kind"], "send_command_failed");
        assert_eq!(body["error"], "Error executing command: throttled");
    }

    #[test]
    fn should_serialize_response_with_camel_case_status_code() {
        let response = DispatchOutcome::Failed(DispatchError::MissingDocumentName).into_response();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["statusCode"], 400);

        let body: Value = serde_json::from_str(json["body"].as_str().unwrap()).unwrap();
        assert_eq!(body["error"], "No document name provided");
        assert_eq!(body["status"], "validation_error");
    }
}
