use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::error;

use crate::adapters::object_store::ObjectStore;
use crate::error::MonitorError;
use crate::runtime::config::AppConfig;
use crate::runtime::contract::ProcessingResult;
use crate::services::dispatcher::ProcessingTrigger;
use crate::services::monitor::evaluate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// API Gateway proxy events carry an HTTP method; scheduled events do not.
pub fn is_api_gateway_event(event: &Value) -> bool {
    event
        .as_object()
        .map(|object| object.contains_key("httpMethod") || object.contains_key("requestContext"))
        .unwrap_or(false)
}

pub fn handle_monitor_request(
    config: &AppConfig,
    store: &impl ObjectStore,
    trigger: &impl ProcessingTrigger,
    timestamp: i64,
) -> ApiGatewayResponse {
    match evaluate(config, store, trigger, timestamp) {
        Ok(result) => match serde_json::to_string(&result) {
            Ok(body) => ApiGatewayResponse {
                status_code: 200,
                headers: cors_headers(),
                body,
            },
            Err(error) => internal_error_response(&error.to_string()),
        },
        Err(error) => {
            error!(error = %error, "monitoring request failed");
            internal_error_response(&error.to_string())
        }
    }
}

/// Scheduled invocations surface failures to the platform instead of
/// answering with an error document.
pub fn handle_scheduled_event(
    config: &AppConfig,
    store: &impl ObjectStore,
    trigger: &impl ProcessingTrigger,
    timestamp: i64,
) -> Result<ProcessingResult, MonitorError> {
    evaluate(config, store, trigger, timestamp).inspect_err(|error| {
        error!(error = %error, "scheduled monitoring failed");
    })
}

fn internal_error_response(message: &str) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code: 500,
        headers: cors_headers(),
        body: json!({
            "error": "Internal server error",
            "message": message,
        })
        .to_string(),
    }
}

fn cors_headers() -> Value {
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*",
        "Access-Control-Allow-Methods": "GET, POST, OPTIONS",
        "Access-Control-Allow-Headers": "Content-Type, Authorization",
    })
}
