//! In-memory fakes behind the adapter traits.

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use crate::adapters::object_store::{ListPage, ObjectStore};
use crate::adapters::workflow::WorkflowStarter;
use crate::error::DispatchError;
use crate::runtime::config::AppConfig;
use crate::runtime::workflow::{StateMachineSummary, WorkflowKind};
use crate::services::dispatcher::ProcessingTrigger;

/// Single-bucket store. Pages are served in descending key order so callers
/// cannot rely on the store for ordering.
pub(crate) struct RecordingStore {
    bucket: String,
    page_size: usize,
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
    failing_copies: HashSet<String>,
    failing_deletes: HashSet<String>,
    failing_heads: HashSet<String>,
    failing_listings: bool,
    list_calls: Mutex<usize>,
    operations: Mutex<Vec<String>>,
}

impl RecordingStore {
    pub(crate) fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            page_size: 1000,
            objects: Mutex::new(BTreeMap::new()),
            failing_copies: HashSet::new(),
            failing_deletes: HashSet::new(),
            failing_heads: HashSet::new(),
            failing_listings: false,
            list_calls: Mutex::new(0),
            operations: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub(crate) fn with_failing_copy(mut self, key: &str) -> Self {
        self.failing_copies.insert(key.to_string());
        self
    }

    pub(crate) fn with_failing_delete(mut self, key: &str) -> Self {
        self.failing_deletes.insert(key.to_string());
        self
    }

    pub(crate) fn with_failing_head(mut self, key: &str) -> Self {
        self.failing_heads.insert(key.to_string());
        self
    }

    pub(crate) fn with_failing_listings(mut self) -> Self {
        self.failing_listings = true;
        self
    }

    pub(crate) fn seed_object(&self, key: &str, body: &[u8]) {
        self.objects
            .lock()
            .expect("poisoned mutex")
            .insert(key.to_string(), body.to_vec());
    }

    pub(crate) fn seed_files(&self, prefix: &str, count: usize) {
        for index in 0..count {
            self.seed_object(&format!("{prefix}file-{index:04}.json"), b"{}");
        }
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.objects
            .lock()
            .expect("poisoned mutex")
            .keys()
            .cloned()
            .collect()
    }

    pub(crate) fn keys_under(&self, prefix: &str) -> Vec<String> {
        self.keys()
            .into_iter()
            .filter(|key| key.starts_with(prefix))
            .collect()
    }

    pub(crate) fn list_calls(&self) -> usize {
        *self.list_calls.lock().expect("poisoned mutex")
    }

    pub(crate) fn operations(&self) -> Vec<String> {
        self.operations.lock().expect("poisoned mutex").clone()
    }

    fn check_bucket(&self, bucket: &str) -> Result<(), String> {
        if bucket == self.bucket {
            Ok(())
        } else {
            Err(format!("NoSuchBucket: {bucket}"))
        }
    }

    fn record(&self, operation: String) {
        self.operations
            .lock()
            .expect("poisoned mutex")
            .push(operation);
    }
}

impl ObjectStore for RecordingStore {
    fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<&str>,
    ) -> Result<ListPage, String> {
        *self.list_calls.lock().expect("poisoned mutex") += 1;
        self.check_bucket(bucket)?;
        if self.failing_listings {
            return Err("SlowDown: reduce your request rate".to_string());
        }

        let mut matching: Vec<String> = self.keys_under(prefix);
        matching.reverse();

        let start = continuation_token
            .map(|token| token.parse::<usize>().map_err(|error| error.to_string()))
            .transpose()?
            .unwrap_or(0);
        let end = (start + self.page_size).min(matching.len());
        let next_continuation_token = (end < matching.len()).then(|| end.to_string());

        Ok(ListPage {
            keys: matching[start..end].to_vec(),
            next_continuation_token,
        })
    }

    fn copy_object(
        &self,
        bucket: &str,
        source_key: &str,
        destination_key: &str,
    ) -> Result<(), String> {
        self.check_bucket(bucket)?;
        self.record(format!("copy {source_key} -> {destination_key}"));
        if self.failing_copies.contains(source_key) {
            return Err(format!("AccessDenied: copy {source_key}"));
        }

        let mut objects = self.objects.lock().expect("poisoned mutex");
        let body = objects
            .get(source_key)
            .cloned()
            .ok_or_else(|| format!("NoSuchKey: {source_key}"))?;
        objects.insert(destination_key.to_string(), body);
        Ok(())
    }

    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), String> {
        self.check_bucket(bucket)?;
        self.record(format!("delete {key}"));
        if self.failing_deletes.contains(key) {
            return Err(format!("AccessDenied: delete {key}"));
        }

        self.objects.lock().expect("poisoned mutex").remove(key);
        Ok(())
    }

    fn content_length(&self, bucket: &str, key: &str) -> Result<u64, String> {
        self.check_bucket(bucket)?;
        if self.failing_heads.contains(key) {
            return Err(format!("Forbidden: head {key}"));
        }

        self.objects
            .lock()
            .expect("poisoned mutex")
            .get(key)
            .map(|body| body.len() as u64)
            .ok_or_else(|| format!("NotFound: {key}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StartedExecution {
    pub state_machine_arn: String,
    pub execution_name: String,
    pub input: serde_json::Value,
}

pub(crate) struct CapturingStarter {
    candidates: Result<Vec<StateMachineSummary>, String>,
    start_failure: Option<String>,
    started: Mutex<Vec<StartedExecution>>,
}

impl CapturingStarter {
    pub(crate) fn new() -> Self {
        Self {
            candidates: Ok(Vec::new()),
            start_failure: None,
            started: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_candidates(mut self, candidates: &[(&str, &str)]) -> Self {
        self.candidates = Ok(candidates
            .iter()
            .map(|(name, arn)| StateMachineSummary {
                name: name.to_string(),
                arn: arn.to_string(),
            })
            .collect());
        self
    }

    pub(crate) fn with_listing_failure(mut self) -> Self {
        self.candidates = Err("AccessDeniedException: states:ListStateMachines".to_string());
        self
    }

    pub(crate) fn with_start_failure(mut self, message: &str) -> Self {
        self.start_failure = Some(message.to_string());
        self
    }

    pub(crate) fn started(&self) -> Vec<StartedExecution> {
        self.started.lock().expect("poisoned mutex").clone()
    }
}

impl WorkflowStarter for CapturingStarter {
    fn start_execution(
        &self,
        state_machine_arn: &str,
        execution_name: &str,
        input: &str,
    ) -> Result<String, String> {
        if let Some(message) = &self.start_failure {
            return Err(message.clone());
        }

        let input = serde_json::from_str(input).map_err(|error| error.to_string())?;
        self.started
            .lock()
            .expect("poisoned mutex")
            .push(StartedExecution {
                state_machine_arn: state_machine_arn.to_string(),
                execution_name: execution_name.to_string(),
                input,
            });
        Ok(format!(
            "{}:{execution_name}",
            state_machine_arn.replace(":stateMachine:", ":execution:")
        ))
    }

    fn list_state_machines(&self) -> Result<Vec<StateMachineSummary>, String> {
        self.candidates.clone()
    }
}

pub(crate) const EXECUTION_ARN: &str =
    "arn:aws:states:us-east-1:123456789012:execution:test-state-machine:test-execution";

pub(crate) fn monitor_config() -> AppConfig {
    AppConfig {
        bucket_name: "test-bucket".to_string(),
        pending_prefix: "pending/".to_string(),
        file_threshold: 2000,
        ..AppConfig::default()
    }
}

pub(crate) struct CapturingTrigger {
    fail: bool,
    calls: Mutex<Vec<(String, String)>>,
}

impl CapturingTrigger {
    pub(crate) fn new() -> Self {
        Self {
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().expect("poisoned mutex").clone()
    }
}

impl ProcessingTrigger for CapturingTrigger {
    fn trigger_processing(
        &self,
        bucket_name: &str,
        source_prefix: &str,
        _timestamp: i64,
    ) -> Result<String, DispatchError> {
        self.calls
            .lock()
            .expect("poisoned mutex")
            .push((bucket_name.to_string(), source_prefix.to_string()));
        if self.fail {
            return Err(DispatchError::Start {
                workflow: WorkflowKind::FileProcessing,
                message: "StateMachineDoesNotExist".to_string(),
            });
        }
        Ok(EXECUTION_ARN.to_string())
    }
}
