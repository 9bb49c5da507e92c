use thiserror::Error;

use crate::runtime::batching::PartitionError;
use crate::runtime::workflow::WorkflowKind;
use crate::services::mover::MoveOutcome;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to list files in bucket `{bucket}` with prefix `{prefix}`: {message}")]
pub struct ListingError {
    pub bucket: String,
    pub prefix: String,
    pub message: String,
}

impl ListingError {
    pub fn new(bucket: &str, prefix: &str, message: impl Into<String>) -> Self {
        Self {
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to check file size of `{key}` in bucket `{bucket}`: {message}")]
pub struct ObjectReadError {
    pub bucket: String,
    pub key: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error(transparent)]
    Listing(#[from] ListingError),
    #[error(transparent)]
    Partition(#[from] PartitionError),
    /// Batches listed in `completed_batches` stay moved; nothing is rolled back.
    #[error("failed to move files in batch `{batch_prefix}` after {} completed batches: {outcome}", .completed_batches.len())]
    Object {
        batch_prefix: String,
        outcome: MoveOutcome,
        completed_batches: Vec<String>,
    },
}

impl MoveError {
    pub fn completed_batches(&self) -> &[String] {
        match self {
            Self::Object {
                completed_batches, ..
            } => completed_batches,
            Self::Listing(_) | Self::Partition(_) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("no state machine reference resolved for the {0} workflow")]
    MissingStateMachine(WorkflowKind),
    #[error("failed to serialize {workflow} workflow input: {message}")]
    Payload {
        workflow: WorkflowKind,
        message: String,
    },
    #[error("failed to start {workflow} workflow: {message}")]
    Start {
        workflow: WorkflowKind,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Listing(#[from] ListingError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
