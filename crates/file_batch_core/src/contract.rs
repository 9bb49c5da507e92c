use serde::{Deserialize, Serialize};

use crate::validation::ValidationVerdict;

pub const STATUS_SUCCESS: &str = "SUCCESS";
pub const STATUS_FAILED: &str = "FAILED";

/// Input handed to the file-processing state machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingTriggerInput {
    pub bucket_name: String,
    pub source_prefix: String,
    pub dest_prefix: String,
    pub batch_size: usize,
    pub timestamp: i64,
}

/// Input handed to the file-validation state machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationTriggerInput {
    pub bucket_name: String,
    pub batch_prefix: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchingRequest {
    pub bucket_name: String,
    pub source_prefix: String,
    pub dest_prefix: String,
}

/// Validation input; the batch bookkeeping fields are accepted but only the
/// bucket and prefix drive the scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    pub bucket_name: String,
    pub batch_prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_files: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// Outcome of one monitoring cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    pub file_count: u64,
    pub threshold: u64,
    pub bucket_name: String,
    pub workflow_triggered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_function_execution_arn: Option<String>,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchingResult {
    pub bucket_name: String,
    pub source_prefix: String,
    pub dest_prefix: String,
    pub batch_prefixes: Vec<String>,
    pub total_batches: usize,
    pub batch_size: usize,
    pub timestamp: i64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub bucket_name: String,
    pub batch_prefix: String,
    pub total_files: usize,
    pub valid_files: usize,
    pub empty_files: usize,
    pub error_files: usize,
    pub is_valid: bool,
    pub timestamp: i64,
}

impl ValidationResult {
    pub fn from_verdict(
        bucket_name: impl Into<String>,
        batch_prefix: impl Into<String>,
        verdict: &ValidationVerdict,
        timestamp: i64,
    ) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            batch_prefix: batch_prefix.into(),
            total_files: verdict.total_files,
            valid_files: verdict.valid_files,
            empty_files: verdict.empty_files,
            error_files: verdict.error_files,
            is_valid: verdict.is_valid(),
            timestamp,
        }
    }
}

/// Document returned to the orchestrator when a step fails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FailureResult {
    pub error: bool,
    pub error_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Batches fully moved before a batching failure; they are not rolled back.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub completed_batch_prefixes: Vec<String>,
    pub timestamp: i64,
}

impl FailureResult {
    pub fn new(error_message: impl Into<String>, timestamp: i64) -> Self {
        Self {
            error: true,
            error_message: error_message.into(),
            status: None,
            completed_batch_prefixes: Vec::new(),
            timestamp,
        }
    }

    pub fn with_failed_status(mut self) -> Self {
        self.status = Some(STATUS_FAILED.to_string());
        self
    }

    pub fn with_completed_batches(mut self, prefixes: &[String]) -> Self {
        self.completed_batch_prefixes = prefixes.to_vec();
        self
    }
}
