use crate::runtime::workflow::StateMachineSummary;

pub trait WorkflowStarter {
    /// Returns the orchestrator's execution reference.
    fn start_execution(
        &self,
        state_machine_arn: &str,
        execution_name: &str,
        input: &str,
    ) -> Result<String, String>;

    fn list_state_machines(&self) -> Result<Vec<StateMachineSummary>, String>;
}

impl<T: WorkflowStarter + ?Sized> WorkflowStarter for &T {
    fn start_execution(
        &self,
        state_machine_arn: &str,
        execution_name: &str,
        input: &str,
    ) -> Result<String, String> {
        (**self).start_execution(state_machine_arn, execution_name, input)
    }

    fn list_state_machines(&self) -> Result<Vec<StateMachineSummary>, String> {
        (**self).list_state_machines()
    }
}
