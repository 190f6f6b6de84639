//! # comply-core
//!
//! Foundation crate for the Comply redaction pipeline.
//! Defines the data model, collaborator traits, errors, config,
//! fingerprinting, and tracing setup shared by every other crate.

pub mod config;
pub mod constants;
pub mod errors;
pub mod fingerprint;
pub mod models;
pub mod tracing_setup;
pub mod traits;

pub use config::ComplyConfig;
pub use errors::{ComplyErrorCode, PipelineError};
pub use models::*;
