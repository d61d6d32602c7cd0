//! # autorun-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** adapters must implement (driven/outbound port):
//!   - `ManagementPlane` — target lookup, document schema lookup, command submission
//! - Define the **driving/inbound** use-case:
//!   - `DispatchService` — turn one change notification into one dispatch outcome
//! - Orchestrate domain objects without knowing *how* the remote calls are made
//!
//! ## Dependency rule
//! Depends on `autorun-domain` only (plus `tokio` for the task guard).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
