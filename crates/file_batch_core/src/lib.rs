//! Shared file batching domain primitives.
//!
//! This crate owns the deterministic parts of the pending-file pipeline:
//! listing order, batch partitioning, validation verdicts, workflow naming
//! and request/response contracts. It excludes AWS SDK and Lambda runtime
//! concerns; those live in `file_batch_lambda`.

pub mod batching;
pub mod config;
pub mod contract;
pub mod listing;
pub mod threshold;
pub mod validation;
pub mod workflow;
