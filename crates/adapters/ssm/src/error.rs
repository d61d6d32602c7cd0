//! SSM adapter error types.

use aws_sdk_ssm::error::{DisplayErrorContext, SdkError};

use autorun_domain::error::{RemoteError, RemoteOperation};

/// Errors specific to the SSM adapter.
#[derive(Debug, thiserror::Error)]
pub enum SsmError {
    /// A request input could not be built.
    #[error("failed to build SSM request")]
    Build(#[from] aws_sdk_ssm::error::BuildError),

    /// The SDK call failed (transport, credentials, throttling, service error).
    #[error("SSM request failed")]
    Sdk(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// The service answered without a field the adapter relies on.
    #[error("SSM response is missing `{0}`")]
    MissingField(&'static str),
}

impl<E, R> From<SdkError<E, R>> for SsmError
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    fn from(err: SdkError<E, R>) -> Self {
        Self::Sdk(Box::new(err))
    }
}

impl SsmError {
    /// Convert into a [`RemoteError`] for propagation across the port
    /// boundary, rendering the full error chain into the message.
    #[must_use]
    pub fn into_remote(self, operation: RemoteOperation) -> RemoteError {
        let message = match &self {
            Self::Sdk(source) => DisplayErrorContext(source.as_ref()).to_string(),
            Self::Build(source) => format!("{self}: {source}"),
            Self::MissingField(_) => self.to_string(),
        };
        RemoteError::new(operation, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_missing_field_error() {
        let err = SsmError::MissingField("Command.CommandId");
        assert_eq!(err.to_string(), "SSM response is missing `Command.CommandId`");
    }

    #[test]
    fn should_keep_operation_when_converting_to_remote_error() {
        let remote = SsmError::MissingField("Command").into_remote(RemoteOperation::SendCommand);
        assert_eq!(remote.operation, RemoteOperation::SendCommand);
        assert!(remote.message.contains("Command"));
    }

    #[test]
    fn should_render_source_chain_for_sdk_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "connect timed out");
        let remote =
            SsmError::Sdk(Box::new(io)).into_remote(RemoteOperation::DescribeTargets);
        assert!(remote.message.contains("connect timed out"));
    }
}
