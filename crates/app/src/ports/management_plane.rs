//! Management plane port — the remote service that knows about managed
//! targets and documents, and runs commands.

use std::future::Future;

use autorun_domain::command::{CommandId, CommandRequest};
use autorun_domain::error::RemoteError;
use autorun_domain::parameters::DocumentParameter;
use autorun_domain::target::{TargetId, TargetInfo};

/// Remote management plane the dispatcher talks to.
///
/// Implementations hold no per-call state, so a single instance is shared
/// across invocations.
pub trait ManagementPlane {
    /// Describe registered targets, filtered to exactly `target`.
    ///
    /// An empty list means the target is not registered or not reachable.
    fn describe_targets(
        &self,
        target: &TargetId,
    ) -> impl Future<Output = Result<Vec<TargetInfo>, RemoteError>> + Send;

    /// Describe the parameters declared by the document `name`.
    fn describe_document_parameters(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<DocumentParameter>, RemoteError>> + Send;

    /// Submit an execution request and return its tracking identifier.
    fn send_command(
        &self,
        request: CommandRequest,
    ) -> impl Future<Output = Result<CommandId, RemoteError>> + Send;
}

impl<T: ManagementPlane + Send + Sync> ManagementPlane for std::sync::Arc<T> {
    fn describe_targets(
        &self,
        target: &TargetId,
    ) -> impl Future<Output = Result<Vec<TargetInfo>, RemoteError>> + Send {
        (**self).describe_targets(target)
    }

    fn describe_document_parameters(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<DocumentParameter>, RemoteError>> + Send {
        (**self).describe_document_parameters(name)
    }

    fn send_command(
        &self,
        request: CommandRequest,
    ) -> impl Future<Output = Result<CommandId, RemoteError>> + Send {
        (**self).send_command(request)
    }
}
