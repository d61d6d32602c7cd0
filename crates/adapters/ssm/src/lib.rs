//! # autorun-adapter-ssm
//!
//! Management plane adapter backed by AWS Systems Manager
//! ([aws-sdk-ssm](https://docs.rs/aws-sdk-ssm)).
//!
//! ## Responsibilities
//! - Implement the [`ManagementPlane`] port defined in `autorun-app::ports`
//! - `DescribeInstanceInformation` filtered to the single configured instance
//! - `DescribeDocument` to read a document's declared parameters
//! - `SendCommand` to run a document on the instance
//! - Map SDK shapes and SDK errors into domain types
//!
//! ## Dependency rule
//! Depends on `autorun-app` (for the port trait) and `autorun-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod mapping;

pub use error::SsmError;

use aws_sdk_ssm::Client;

use autorun_app::ports::ManagementPlane;
use autorun_domain::command::{CommandId, CommandRequest};
use autorun_domain::error::{RemoteError, RemoteOperation};
use autorun_domain::parameters::DocumentParameter;
use autorun_domain::target::{TargetId, TargetInfo};

/// [`ManagementPlane`] implementation talking to the SSM API.
///
/// The SDK client is cheaply cloneable and holds no per-call state, so one
/// instance is built per process and shared across invocations.
#[derive(Debug, Clone)]
pub struct SsmManagementPlane {
    client: Client,
}

impl SsmManagementPlane {
    /// Wrap an existing SDK client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the default credential and region chain
    /// (environment, shared config, execution role).
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config))
    }

    async fn try_describe_targets(&self, target: &TargetId) -> Result<Vec<TargetInfo>, SsmError> {
        let output = self
            .client
            .describe_instance_information()
            .instance_information_filter_list(mapping::instance_filter(target)?)
            .send()
            .await?;
        Ok(output
            .instance_information_list()
            .iter()
            .map(mapping::target_info)
            .collect())
    }

    async fn try_describe_document_parameters(
        &self,
        name: &str,
    ) -> Result<Vec<DocumentParameter>, SsmError> {
        let output = self.client.describe_document().name(name).send().await?;
        Ok(output
            .document()
            .map(|doc| {
                doc.parameters()
                    .iter()
                    .map(mapping::document_parameter)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn try_send_command(&self, request: CommandRequest) -> Result<CommandId, SsmError> {
        let output = self
            .client
            .send_command()
            .instance_ids(request.target.as_str())
            .document_name(&request.document.name)
            .document_version(&request.document.version)
            .set_parameters(Some(mapping::command_parameters(&request.parameters)))
            .timeout_seconds(i32::try_from(request.timeout_secs).unwrap_or(i32::MAX))
            .comment(&request.comment)
            .send()
            .await?;
        let command = output.command().ok_or(SsmError::MissingField("Command"))?;
        let command_id = command
            .command_id()
            .ok_or(SsmError::MissingField("Command.CommandId"))?;
        Ok(CommandId::new(command_id))
    }
}

impl ManagementPlane for SsmManagementPlane {
    async fn describe_targets(&self, target: &TargetId) -> Result<Vec<TargetInfo>, RemoteError> {
        tracing::debug!(instance_id = %target, "describing instance information");
        self.try_describe_targets(target)
            .await
            .map_err(|err| err.into_remote(RemoteOperation::DescribeTargets))
    }

    async fn describe_document_parameters(
        &self,
        name: &str,
    ) -> Result<Vec<DocumentParameter>, RemoteError> {
        tracing::debug!(document_name = %name, "describing document");
        self.try_describe_document_parameters(name)
            .await
            .map_err(|err| err.into_remote(RemoteOperation::DescribeDocument))
    }

    async fn send_command(&self, request: CommandRequest) -> Result<CommandId, RemoteError> {
        tracing::debug!(
            instance_id = %request.target,
            document_name = %request.document.name,
            parameter_count = request.parameters.len(),
            "sending command"
        );
        self.try_send_command(request)
            .await
            .map_err(|err| err.into_remote(RemoteOperation::SendCommand))
    }
}
