use aws_sdk_sfn::error::DisplayErrorContext;

use crate::adapters::block_on_sdk;
use crate::adapters::workflow::WorkflowStarter;
use crate::runtime::workflow::StateMachineSummary;

#[derive(Debug, Clone)]
pub struct StepFunctionsStarter {
    client: aws_sdk_sfn::Client,
}

impl StepFunctionsStarter {
    pub fn new(client: aws_sdk_sfn::Client) -> Self {
        Self { client }
    }
}

impl WorkflowStarter for StepFunctionsStarter {
    fn start_execution(
        &self,
        state_machine_arn: &str,
        execution_name: &str,
        input: &str,
    ) -> Result<String, String> {
        let client = self.client.clone();
        let state_machine_arn = state_machine_arn.to_string();
        let execution_name = execution_name.to_string();
        let input = input.to_string();

        block_on_sdk(async move {
            client
                .start_execution()
                .state_machine_arn(state_machine_arn)
                .name(execution_name)
                .input(input)
                .send()
                .await
                .map(|output| output.execution_arn().to_string())
                .map_err(|error| {
                    format!("failed to start execution: {}", DisplayErrorContext(&error))
                })
        })
    }

    fn list_state_machines(&self) -> Result<Vec<StateMachineSummary>, String> {
        let client = self.client.clone();

        block_on_sdk(async move {
            let mut summaries = Vec::new();
            let mut next_token: Option<String> = None;
            loop {
                let output = client
                    .list_state_machines()
                    .set_next_token(next_token)
                    .send()
                    .await
                    .map_err(|error| {
                        format!(
                            "failed to list state machines: {}",
                            DisplayErrorContext(&error)
                        )
                    })?;

                summaries.extend(output.state_machines().iter().map(|item| {
                    StateMachineSummary {
                        name: item.name().to_string(),
                        arn: item.state_machine_arn().to_string(),
                    }
                }));

                next_token = output.next_token().map(str::to_string);
                if next_token.is_none() {
                    return Ok(summaries);
                }
            }
        })
    }
}
