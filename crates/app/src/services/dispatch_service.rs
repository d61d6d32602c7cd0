//! Dispatch service — turns one change notification into one dispatch outcome.
//!
//! The chain is strictly sequential:
//!
//! 1. parse the notification and require a document name
//! 2. ignore documents outside the configured prefix
//! 3. resolve the configured target
//! 4. check the target is registered with the management plane
//! 5. collect the document's parameter defaults (best effort)
//! 6. submit the command
//!
//! Steps 1–3 never touch the management plane. Every failure becomes a
//! [`DispatchOutcome::Failed`]; nothing is retried.

use std::sync::Arc;

use autorun_domain::command::{CommandRequest, DEFAULT_COMMENT, DEFAULT_TIMEOUT_SECS};
use autorun_domain::error::{DispatchError, RemoteError};
use autorun_domain::notification::{ChangeNotification, DocumentRef};
use autorun_domain::outcome::DispatchOutcome;
use autorun_domain::parameters::ParameterDefaults;
use autorun_domain::target::TargetId;
use serde_json::Value;

use crate::ports::ManagementPlane;

/// Document name prefix dispatched by default.
pub const DEFAULT_DOCUMENT_PREFIX: &str = "OpenVPN-";

/// Fixed knobs applied to every dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchPolicy {
    /// Only documents whose name starts with this prefix are dispatched.
    pub document_prefix: String,
    /// Execution timeout passed to the management plane.
    pub timeout_secs: u32,
    /// Human-readable annotation attached to the command.
    pub comment: String,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            document_prefix: DEFAULT_DOCUMENT_PREFIX.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            comment: DEFAULT_COMMENT.to_string(),
        }
    }
}

/// Result of screening a notification before any remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screening {
    /// The document is outside the prefix of interest.
    Ignored { document_name: String },
    /// The document should be dispatched to `target`.
    Accepted {
        document: DocumentRef,
        target: TargetId,
    },
}

/// Parameter defaults plus the failure that prevented collecting them, if any.
///
/// A lookup failure is only ever reported as a warning; the defaults are
/// then empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DefaultsLookup {
    pub defaults: ParameterDefaults,
    pub warning: Option<RemoteError>,
}

/// Application service dispatching changed documents to the configured target.
pub struct DispatchService<P> {
    plane: P,
    target: Option<String>,
    policy: DispatchPolicy,
}

impl<P: ManagementPlane> DispatchService<P> {
    /// Create a new service.
    ///
    /// `target` is the raw configured instance id; it is resolved on every
    /// invocation so that a missing value is reported per notification.
    pub fn new(plane: P, target: Option<String>, policy: DispatchPolicy) -> Self {
        Self {
            plane,
            target,
            policy,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &DispatchPolicy {
        &self.policy
    }

    /// Handle one notification envelope.
    ///
    /// Never fails: every error is classified into the returned outcome.
    #[tracing::instrument(skip(self, envelope))]
    pub async fn handle(&self, envelope: Value) -> DispatchOutcome {
        tracing::info!(%envelope, "received change notification");

        match self.dispatch(envelope).await {
            Ok(outcome) => outcome,
            Err(err) => {
                match &err {
                    DispatchError::TargetUnavailable { target } => {
                        tracing::error!(instance_id = %target, "instance not found or not SSM-enabled");
                    }
                    other => tracing::error!(kind = other.kind(), error = %other, "dispatch failed"),
                }
                DispatchOutcome::Failed(err)
            }
        }
    }

    async fn dispatch(&self, envelope: Value) -> Result<DispatchOutcome, DispatchError> {
        let notification = ChangeNotification::from_envelope(envelope)?;

        let (document, target) = match self.screen(&notification)? {
            Screening::Ignored { document_name } => {
                tracing::info!(%document_name, prefix = %self.policy.document_prefix, "ignoring document outside dispatch prefix");
                return Ok(DispatchOutcome::Ignored { document_name });
            }
            Screening::Accepted { document, target } => (document, target),
        };

        tracing::info!(
            document_name = %document.name,
            document_version = %document.version,
            instance_id = %target,
            "dispatching document"
        );

        self.ensure_available(&target).await?;

        let DefaultsLookup { defaults, warning } =
            self.lookup_defaults(&document.name).await;
        if let Some(warning) = warning {
            tracing::warn!(error = %warning, document_name = %document.name, "could not get document parameters");
        } else {
            tracing::info!(
                document_name = %document.name,
                defaults = defaults.len(),
                "collected parameter defaults"
            );
        }

        let request = CommandRequest {
            target: target.clone(),
            document: document.clone(),
            parameters: defaults,
            timeout_secs: self.policy.timeout_secs,
            comment: self.policy.comment.clone(),
        };
        let command_id = self.plane.send_command(request).await?;

        tracing::info!(%command_id, instance_id = %target, "command sent");

        Ok(DispatchOutcome::Dispatched {
            command_id,
            target,
            document,
        })
    }

    /// Apply the checks that need no remote call: document name, prefix,
    /// target configuration and document version, in that order.
    ///
    /// The prefix match is case-sensitive. The version is only checked for
    /// accepted documents.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MissingDocumentName`],
    /// [`DispatchError::TargetNotConfigured`] or
    /// [`DispatchError::MalformedNotification`] for a non-string version.
    pub fn screen(&self, notification: &ChangeNotification) -> Result<Screening, DispatchError> {
        let name = notification.document_name()?;
        if !name.starts_with(&self.policy.document_prefix) {
            return Ok(Screening::Ignored {
                document_name: name.to_string(),
            });
        }
        let target = TargetId::resolve(self.target.as_deref())?;
        let document = notification.document()?;
        Ok(Screening::Accepted { document, target })
    }

    async fn ensure_available(&self, target: &TargetId) -> Result<(), DispatchError> {
        let registered = self.plane.describe_targets(target).await?;
        let Some(info) = registered.first() else {
            return Err(DispatchError::TargetUnavailable {
                target: target.to_string(),
            });
        };
        tracing::info!(
            instance_id = %info.instance_id,
            ping_status = info.ping_status.as_deref().unwrap_or("unknown"),
            "target registered"
        );
        Ok(())
    }

    /// Collect the defaults declared by document `name`.
    ///
    /// Never fails; a lookup error yields empty defaults and a warning.
    pub async fn lookup_defaults(&self, name: &str) -> DefaultsLookup {
        match self.plane.describe_document_parameters(name).await {
            Ok(declared) => DefaultsLookup {
                defaults: ParameterDefaults::from_declared(&declared),
                warning: None,
            },
            Err(err) => DefaultsLookup {
                defaults: ParameterDefaults::default(),
                warning: Some(err),
            },
        }
    }
}

impl<P> DispatchService<P>
where
    P: ManagementPlane + Send + Sync + 'static,
{
    /// Handle one notification inside its own task, so that a panic in the
    /// chain is reported as [`DispatchError::Unexpected`] instead of
    /// tearing down the caller.
    pub async fn handle_guarded(self: Arc<Self>, envelope: Value) -> DispatchOutcome {
        let task = tokio::spawn(async move { self.handle(envelope).await });
        match task.await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, "unexpected error");
                DispatchOutcome::Failed(DispatchError::Unexpected(err.to_string()))
            }
        }
    }
}
