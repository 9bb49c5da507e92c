use aws_config::{BehaviorVersion, Region};
use file_batch_lambda::adapters::s3::S3ObjectStore;
use file_batch_lambda::adapters::step_functions::StepFunctionsStarter;
use file_batch_lambda::handlers::monitor::{
    handle_monitor_request, handle_scheduled_event, is_api_gateway_event,
};
use file_batch_lambda::logging::init_tracing;
use file_batch_lambda::runtime::config::AppConfig;
use file_batch_lambda::services::dispatcher::{discover_state_machine_refs, WorkflowDispatcher};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

struct MonitorFunction {
    config: AppConfig,
    store: S3ObjectStore,
    dispatcher: WorkflowDispatcher<StepFunctionsStarter>,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    function: &MonitorFunction,
) -> Result<Value, Error> {
    let timestamp = chrono::Utc::now().timestamp_millis();
    info!(request_id = %event.context.request_id, "monitor invoked");

    if is_api_gateway_event(&event.payload) {
        let response = handle_monitor_request(
            &function.config,
            &function.store,
            &function.dispatcher,
            timestamp,
        );
        return Ok(serde_json::to_value(response)?);
    }

    let result = handle_scheduled_event(
        &function.config,
        &function.store,
        &function.dispatcher,
        timestamp,
    )
    .map_err(|error| Error::from(error.to_string()))?;
    Ok(serde_json::to_value(result)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();
    let config = AppConfig::from_env().map_err(|error| Error::from(error.to_string()))?;
    info!(config = %config, "monitor function starting");

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()))
        .load()
        .await;
    let store = S3ObjectStore::new(aws_sdk_s3::Client::new(&sdk_config));
    let starter = StepFunctionsStarter::new(aws_sdk_sfn::Client::new(&sdk_config));
    let refs = discover_state_machine_refs(&starter, &config);
    let dispatcher = WorkflowDispatcher::from_config(starter, refs, &config);

    let function = MonitorFunction {
        config,
        store,
        dispatcher,
    };
    let function = &function;
    lambda_runtime::run(service_fn(move |event| handle_request(event, function))).await
}
