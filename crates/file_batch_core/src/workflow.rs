//! Workflow naming and state-machine reference resolution.
//!
//! Resolution is a pure function over already-fetched candidates so that the
//! discovery step can be tested without an orchestrator.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowKind {
    FileProcessing,
    FileValidation,
    BatchProcessing,
}

impl WorkflowKind {
    pub fn execution_prefix(self) -> &'static str {
        match self {
            Self::FileProcessing => "file-processing",
            Self::FileValidation => "file-validation",
            Self::BatchProcessing => "batch-processing",
        }
    }

    /// Batch processing runs on the file-processing state machine.
    pub fn state_machine_family(self) -> &'static str {
        match self {
            Self::FileProcessing | Self::BatchProcessing => "file-processing",
            Self::FileValidation => "file-validation",
        }
    }

    pub fn state_machine_name(self, environment: &str) -> String {
        format!("{}-{environment}", self.state_machine_family())
    }
}

impl std::fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.execution_prefix())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateMachineSummary {
    pub name: String,
    pub arn: String,
}

/// Exact name match first, then a non-blank fallback.
pub fn resolve_state_machine_ref(
    candidates: &[StateMachineSummary],
    name: &str,
    fallback: Option<&str>,
) -> Option<String> {
    candidates
        .iter()
        .find(|candidate| candidate.name == name)
        .map(|candidate| candidate.arn.clone())
        .or_else(|| {
            fallback
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        })
}

/// `{prefix}-{epoch millis}-{nonce}`; the nonce keeps same-millisecond starts apart.
pub fn execution_name(kind: WorkflowKind, timestamp_millis: i64, nonce: &str) -> String {
    format!("{}-{timestamp_millis}-{nonce}", kind.execution_prefix())
}
