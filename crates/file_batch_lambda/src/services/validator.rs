use tracing::{error, info, warn};

use crate::adapters::object_store::ObjectStore;
use crate::error::{ListingError, ObjectReadError};
use crate::runtime::validation::{FileCheck, ValidationVerdict};
use crate::services::lister::list_files;

/// Reads size metadata only.
pub fn is_file_empty(
    store: &impl ObjectStore,
    bucket: &str,
    key: &str,
) -> Result<bool, ObjectReadError> {
    store
        .content_length(bucket, key)
        .map(|length| length == 0)
        .map_err(|message| ObjectReadError {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message,
        })
}

pub fn check_file(store: &impl ObjectStore, bucket: &str, key: &str) -> FileCheck {
    match store.content_length(bucket, key) {
        Ok(length) => {
            let check = FileCheck::from_content_length(length);
            if check == FileCheck::Empty {
                warn!(bucket, key, "empty file detected");
            }
            check
        }
        Err(message) => {
            error!(bucket, key, error = %message, "error validating file");
            FileCheck::Unreadable(message)
        }
    }
}

/// Unreadable files are counted, not fatal; only the listing can fail the call.
pub fn validate_batch(
    store: &impl ObjectStore,
    bucket: &str,
    batch_prefix: &str,
) -> Result<ValidationVerdict, ListingError> {
    let files = list_files(store, bucket, batch_prefix)?;
    let checks: Vec<FileCheck> = files
        .iter()
        .map(|key| check_file(store, bucket, key))
        .collect();
    let verdict = ValidationVerdict::from_checks(&checks);

    info!(
        bucket,
        batch_prefix,
        total = verdict.total_files,
        valid = verdict.valid_files,
        empty = verdict.empty_files,
        errors = verdict.error_files,
        "validation completed"
    );
    Ok(verdict)
}
