use tracing::info;

use crate::adapters::object_store::ObjectStore;
use crate::error::MonitorError;
use crate::runtime::config::AppConfig;
use crate::runtime::contract::ProcessingResult;
use crate::runtime::threshold::threshold_reached;
use crate::services::dispatcher::ProcessingTrigger;
use crate::services::lister::count_files;

/// One monitoring cycle: count pending files and trigger processing once the
/// threshold is reached. Counting and dispatch failures are returned, never
/// folded into an untriggered result.
pub fn evaluate(
    config: &AppConfig,
    store: &impl ObjectStore,
    trigger: &impl ProcessingTrigger,
    timestamp: i64,
) -> Result<ProcessingResult, MonitorError> {
    let bucket_name = config.bucket_name.as_str();
    let pending_prefix = config.pending_prefix.as_str();
    let threshold = config.file_threshold;
    info!(
        bucket = bucket_name,
        prefix = pending_prefix,
        threshold,
        "checking pending files"
    );

    let file_count = count_files(store, bucket_name, pending_prefix)?;
    info!(file_count, "found pending files");

    let step_function_execution_arn = if threshold_reached(file_count, threshold) {
        let execution_arn = trigger.trigger_processing(bucket_name, pending_prefix, timestamp)?;
        info!(execution_arn = %execution_arn, "file threshold reached, workflow started");
        Some(execution_arn)
    } else {
        info!("file threshold not reached, no action taken");
        None
    };

    Ok(ProcessingResult {
        file_count,
        threshold,
        bucket_name: bucket_name.to_string(),
        workflow_triggered: step_function_execution_arn.is_some(),
        step_function_execution_arn,
        timestamp,
    })
}
