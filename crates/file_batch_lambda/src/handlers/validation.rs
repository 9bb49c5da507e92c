use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::adapters::object_store::ObjectStore;
use crate::runtime::contract::{FailureResult, ValidationRequest, ValidationResult};
use crate::services::validator::validate_batch;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ValidationResponse {
    Completed(ValidationResult),
    Failed(FailureResult),
}

pub fn handle_validation_event(
    event: Value,
    store: &impl ObjectStore,
    timestamp: i64,
) -> ValidationResponse {
    let request: ValidationRequest = match serde_json::from_value(event) {
        Ok(request) => request,
        Err(error) => {
            error!(error = %error, "invalid validation request");
            return ValidationResponse::Failed(FailureResult::new(
                format!("invalid validation request: {error}"),
                timestamp,
            ));
        }
    };
    info!(
        bucket = %request.bucket_name,
        batch_prefix = %request.batch_prefix,
        batch_number = ?request.batch_number,
        "validating batch"
    );

    match validate_batch(store, &request.bucket_name, &request.batch_prefix) {
        Ok(verdict) => ValidationResponse::Completed(ValidationResult::from_verdict(
            request.bucket_name,
            request.batch_prefix,
            &verdict,
            timestamp,
        )),
        Err(listing_error) => {
            error!(error = %listing_error, "batch validation failed");
            ValidationResponse::Failed(FailureResult::new(listing_error.to_string(), timestamp))
        }
    }
}
