//! # autorund — autorun Lambda function
//!
//! Composition root that wires the SSM adapter into the dispatch service and
//! serves change notifications delivered by the Lambda runtime.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize structured logging
//! - Build the SSM client once per process
//! - Construct the dispatch service, injecting the management plane via its port trait
//! - Run the Lambda event loop, answering each event with a `HandlerResponse`
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use autorun_adapter_ssm::SsmManagementPlane;
use autorun_app::services::dispatch_service::DispatchService;
use autorun_domain::outcome::HandlerResponse;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = config::Config::load()?;
    init_logging(&config.logging.filter);

    let plane = SsmManagementPlane::from_env().await;
    let service = Arc::new(DispatchService::new(
        plane,
        config.target_instance_id(),
        config.policy(),
    ));

    tracing::info!(
        document_prefix = %service.policy().document_prefix,
        target_configured = config.target_configured(),
        "autorund ready"
    );

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let service = Arc::clone(&service);
        async move {
            let outcome = service.handle_guarded(event.payload).await;
            Ok::<HandlerResponse, Error>(outcome.into_response())
        }
    }))
    .await
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .without_time()
        .init();
}
