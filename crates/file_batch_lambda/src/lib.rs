//! AWS-oriented adapters and handlers for pending-file batching.
//!
//! This crate owns runtime integration details (Lambda handlers, S3 and Step
//! Functions adapters) and the engine services that drive them through
//! synchronous adapter traits. Deterministic rules live in `file_batch_core`
//! and are exposed here through the `runtime` module.

pub mod adapters;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod runtime;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
