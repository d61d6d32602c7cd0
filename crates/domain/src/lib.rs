//! # autorun-domain
//!
//! Pure domain model for the autorun document dispatcher.
//!
//! ## Responsibilities
//! - Parse **change notifications** (a document was created or updated)
//! - Define the **target** identifier commands are dispatched to
//! - Derive **parameter defaults** from a document's declared schema
//! - Describe **command requests** submitted to the management plane
//! - Classify the **dispatch outcome** and render the invoker response
//! - Typed error conventions shared by every layer
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod command;
pub mod notification;
pub mod outcome;
pub mod parameters;
pub mod target;
