use std::collections::BTreeMap;
use std::sync::Mutex;

use file_batch_lambda::adapters::object_store::{ListPage, ObjectStore};
use file_batch_lambda::adapters::workflow::WorkflowStarter;
use file_batch_lambda::runtime::workflow::StateMachineSummary;
use serde_json::Value;

/// Single-bucket store paging in ascending order, 1000 keys per page.
#[derive(Default)]
pub struct InMemoryBucket {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryBucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, key: &str, body: &[u8]) {
        self.objects
            .lock()
            .expect("poisoned mutex")
            .insert(key.to_string(), body.to_vec());
    }

    pub fn keys_under(&self, prefix: &str) -> Vec<String> {
        self.objects
            .lock()
            .expect("poisoned mutex")
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }
}

impl ObjectStore for InMemoryBucket {
    fn list_page(
        &self,
        _bucket: &str,
        prefix: &str,
        continuation_token: Option<&str>,
    ) -> Result<ListPage, String> {
        let keys = self.keys_under(prefix);
        let start = continuation_token
            .map(|token| token.parse::<usize>().map_err(|error| error.to_string()))
            .transpose()?
            .unwrap_or(0);
        let end = (start + 1000).min(keys.len());
        Ok(ListPage {
            keys: keys[start..end].to_vec(),
            next_continuation_token: (end < keys.len()).then(|| end.to_string()),
        })
    }

    fn copy_object(
        &self,
        _bucket: &str,
        source_key: &str,
        destination_key: &str,
    ) -> Result<(), String> {
        let mut objects = self.objects.lock().expect("poisoned mutex");
        let body = objects
            .get(source_key)
            .cloned()
            .ok_or_else(|| format!("NoSuchKey: {source_key}"))?;
        objects.insert(destination_key.to_string(), body);
        Ok(())
    }

    fn delete_object(&self, _bucket: &str, key: &str) -> Result<(), String> {
        self.objects.lock().expect("poisoned mutex").remove(key);
        Ok(())
    }

    fn content_length(&self, _bucket: &str, key: &str) -> Result<u64, String> {
        self.objects
            .lock()
            .expect("poisoned mutex")
            .get(key)
            .map(|body| body.len() as u64)
            .ok_or_else(|| format!("NotFound: {key}"))
    }
}

#[derive(Debug, Clone)]
pub struct Execution {
    pub state_machine_arn: String,
    pub name: String,
    pub input: Value,
}

pub struct RecordingOrchestrator {
    machines: Vec<StateMachineSummary>,
    executions: Mutex<Vec<Execution>>,
}

impl RecordingOrchestrator {
    pub fn with_machines(names: &[&str]) -> Self {
        Self {
            machines: names
                .iter()
                .map(|name| StateMachineSummary {
                    name: name.to_string(),
                    arn: format!("arn:aws:states:us-east-1:123456789012:stateMachine:{name}"),
                })
                .collect(),
            executions: Mutex::new(Vec::new()),
        }
    }

    pub fn executions(&self) -> Vec<Execution> {
        self.executions.lock().expect("poisoned mutex").clone()
    }
}

impl WorkflowStarter for RecordingOrchestrator {
    fn start_execution(
        &self,
        state_machine_arn: &str,
        execution_name: &str,
        input: &str,
    ) -> Result<String, String> {
        let input = serde_json::from_str(input).map_err(|error| error.to_string())?;
        self.executions
            .lock()
            .expect("poisoned mutex")
            .push(Execution {
                state_machine_arn: state_machine_arn.to_string(),
                name: execution_name.to_string(),
                input,
            });
        Ok(format!("arn:aws:states:us-east-1:123456789012:execution:{execution_name}"))
    }

    fn list_state_machines(&self) -> Result<Vec<StateMachineSummary>, String> {
        Ok(self.machines.clone())
    }
}
