use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::adapters::object_store::ObjectStore;
use crate::runtime::contract::{BatchingRequest, BatchingResult, FailureResult, STATUS_SUCCESS};
use crate::services::mover::move_files_in_batches;

/// Either document is returned as the task output; the orchestrator branches
/// on `status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum BatchingResponse {
    Completed(BatchingResult),
    Failed(FailureResult),
}

pub fn handle_batching_event(
    event: Value,
    batch_size: usize,
    store: &impl ObjectStore,
    timestamp: i64,
) -> BatchingResponse {
    let request: BatchingRequest = match serde_json::from_value(event) {
        Ok(request) => request,
        Err(error) => {
            error!(error = %error, "invalid batching request");
            return BatchingResponse::Failed(
                FailureResult::new(format!("invalid batching request: {error}"), timestamp)
                    .with_failed_status(),
            );
        }
    };
    info!(
        bucket = %request.bucket_name,
        source_prefix = %request.source_prefix,
        dest_prefix = %request.dest_prefix,
        batch_size,
        "moving files into batches"
    );

    match move_files_in_batches(
        store,
        &request.bucket_name,
        &request.source_prefix,
        &request.dest_prefix,
        batch_size,
    ) {
        Ok(batch_prefixes) => BatchingResponse::Completed(BatchingResult {
            bucket_name: request.bucket_name,
            source_prefix: request.source_prefix,
            dest_prefix: request.dest_prefix,
            total_batches: batch_prefixes.len(),
            batch_prefixes,
            batch_size,
            timestamp,
            status: STATUS_SUCCESS.to_string(),
        }),
        Err(move_error) => {
            error!(error = %move_error, "batch processing failed");
            BatchingResponse::Failed(
                FailureResult::new(move_error.to_string(), timestamp)
                    .with_failed_status()
                    .with_completed_batches(move_error.completed_batches()),
            )
        }
    }
}
