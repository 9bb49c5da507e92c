use aws_config::{BehaviorVersion, Region};
use file_batch_lambda::adapters::s3::S3ObjectStore;
use file_batch_lambda::handlers::validation::{handle_validation_event, ValidationResponse};
use file_batch_lambda::logging::init_tracing;
use file_batch_lambda::runtime::config::AppConfig;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

async fn handle_request(
    event: LambdaEvent<Value>,
    store: &S3ObjectStore,
) -> Result<ValidationResponse, Error> {
    let timestamp = chrono::Utc::now().timestamp_millis();
    info!(request_id = %event.context.request_id, "validation invoked");
    Ok(handle_validation_event(event.payload, store, timestamp))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();
    let config = AppConfig::from_env().map_err(|error| Error::from(error.to_string()))?;
    info!(config = %config, "validation function starting");

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()))
        .load()
        .await;
    let store = S3ObjectStore::new(aws_sdk_s3::Client::new(&sdk_config));

    let store = &store;
    lambda_runtime::run(service_fn(move |event| handle_request(event, store))).await
}
