//! Starts orchestrator executions.
//!
//! State-machine references are resolved once per cold start: discovery by
//! environment-specific name, then the configured ARN. A blank result is a
//! hard failure at start time.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::adapters::workflow::WorkflowStarter;
use crate::error::DispatchError;
use crate::runtime::config::AppConfig;
use crate::runtime::contract::{ProcessingTriggerInput, ValidationTriggerInput};
use crate::runtime::workflow::{
    execution_name, resolve_state_machine_ref, StateMachineSummary, WorkflowKind,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateMachineRefs {
    pub file_processing: Option<String>,
    pub file_validation: Option<String>,
}

impl StateMachineRefs {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::resolve(&[], &config.environment, &Self::configured(config))
    }

    pub fn resolve(
        candidates: &[StateMachineSummary],
        environment: &str,
        fallbacks: &Self,
    ) -> Self {
        Self {
            file_processing: resolve_state_machine_ref(
                candidates,
                &WorkflowKind::FileProcessing.state_machine_name(environment),
                fallbacks.file_processing.as_deref(),
            ),
            file_validation: resolve_state_machine_ref(
                candidates,
                &WorkflowKind::FileValidation.state_machine_name(environment),
                fallbacks.file_validation.as_deref(),
            ),
        }
    }

    pub fn for_kind(&self, kind: WorkflowKind) -> Option<&str> {
        match kind {
            WorkflowKind::FileProcessing | WorkflowKind::BatchProcessing => {
                self.file_processing.as_deref()
            }
            WorkflowKind::FileValidation => self.file_validation.as_deref(),
        }
    }

    fn configured(config: &AppConfig) -> Self {
        Self {
            file_processing: Some(config.file_processing_state_machine_arn.clone()),
            file_validation: Some(config.file_validation_state_machine_arn.clone()),
        }
    }
}

/// Lists state machines and matches them by name; a listing failure falls
/// back to the configured ARNs.
pub fn discover_state_machine_refs(
    starter: &impl WorkflowStarter,
    config: &AppConfig,
) -> StateMachineRefs {
    match starter.list_state_machines() {
        Ok(candidates) => {
            let refs = StateMachineRefs::resolve(
                &candidates,
                &config.environment,
                &StateMachineRefs::configured(config),
            );
            info!(
                file_processing = refs.file_processing.as_deref().unwrap_or_default(),
                file_validation = refs.file_validation.as_deref().unwrap_or_default(),
                candidates = candidates.len(),
                "resolved state machines"
            );
            refs
        }
        Err(message) => {
            warn!(error = %message, "failed to discover state machines, using configured ARNs");
            StateMachineRefs::from_config(config)
        }
    }
}

/// What the monitor needs from the dispatcher.
pub trait ProcessingTrigger {
    fn trigger_processing(
        &self,
        bucket_name: &str,
        source_prefix: &str,
        timestamp: i64,
    ) -> Result<String, DispatchError>;
}

#[derive(Debug, Clone)]
pub struct WorkflowDispatcher<W> {
    starter: W,
    refs: StateMachineRefs,
    processing_prefix: String,
    batch_size: usize,
}

impl<W: WorkflowStarter> WorkflowDispatcher<W> {
    pub fn new(
        starter: W,
        refs: StateMachineRefs,
        processing_prefix: impl Into<String>,
        batch_size: usize,
    ) -> Self {
        Self {
            starter,
            refs,
            processing_prefix: processing_prefix.into(),
            batch_size,
        }
    }

    pub fn from_config(starter: W, refs: StateMachineRefs, config: &AppConfig) -> Self {
        Self::new(
            starter,
            refs,
            config.processing_prefix.clone(),
            config.batch_size,
        )
    }

    pub fn start_file_processing(
        &self,
        bucket_name: &str,
        source_prefix: &str,
        timestamp: i64,
    ) -> Result<String, DispatchError> {
        let input = ProcessingTriggerInput {
            bucket_name: bucket_name.to_string(),
            source_prefix: source_prefix.to_string(),
            dest_prefix: self.processing_prefix.clone(),
            batch_size: self.batch_size,
            timestamp,
        };
        self.start(WorkflowKind::FileProcessing, &input, timestamp)
    }

    pub fn start_file_validation(
        &self,
        bucket_name: &str,
        batch_prefix: &str,
        timestamp: i64,
    ) -> Result<String, DispatchError> {
        let input = ValidationTriggerInput {
            bucket_name: bucket_name.to_string(),
            batch_prefix: batch_prefix.to_string(),
            timestamp,
        };
        self.start(WorkflowKind::FileValidation, &input, timestamp)
    }

    /// Caller-supplied input for the processing state machine.
    pub fn start_batch_processing(
        &self,
        parameters: &Map<String, Value>,
        timestamp: i64,
    ) -> Result<String, DispatchError> {
        self.start(WorkflowKind::BatchProcessing, parameters, timestamp)
    }

    fn start(
        &self,
        kind: WorkflowKind,
        input: &impl Serialize,
        timestamp: i64,
    ) -> Result<String, DispatchError> {
        let state_machine_arn = self
            .refs
            .for_kind(kind)
            .filter(|value| !value.trim().is_empty())
            .ok_or(DispatchError::MissingStateMachine(kind))?;
        let input = serde_json::to_string(input).map_err(|error| DispatchError::Payload {
            workflow: kind,
            message: error.to_string(),
        })?;
        let name = execution_name(kind, timestamp, &execution_nonce());

        let execution_arn = self
            .starter
            .start_execution(state_machine_arn, &name, &input)
            .map_err(|message| DispatchError::Start {
                workflow: kind,
                message,
            })?;
        info!(
            workflow = %kind,
            execution_name = %name,
            execution_arn = %execution_arn,
            "started execution"
        );
        Ok(execution_arn)
    }
}

impl<W: WorkflowStarter> ProcessingTrigger for WorkflowDispatcher<W> {
    fn trigger_processing(
        &self,
        bucket_name: &str,
        source_prefix: &str,
        timestamp: i64,
    ) -> Result<String, DispatchError> {
        self.start_file_processing(bucket_name, source_prefix, timestamp)
    }
}

fn execution_nonce() -> String {
    let mut nonce = Uuid::new_v4().simple().to_string();
    nonce.truncate(8);
    nonce
}
