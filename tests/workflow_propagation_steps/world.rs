//! Shared world state for workflow propagation BDD scenarios.

use std::sync::Arc;

use nexus_workflow::{
    task::{adapters::memory::InMemoryTaskRepository, domain::TaskId},
    workflow::{
        domain::{WorkflowConfigError, WorkflowGraph, WorkflowOrdering, WorkflowStatus},
        services::{
            PropagationConfig, PropagationOutcome, StatusPropagationResult,
            StatusPropagationService,
        },
    },
};
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestPropagationService = StatusPropagationService<InMemoryTaskRepository>;

/// Scenario world for workflow propagation behaviour tests.
pub struct WorkflowWorld {
    pub repository: Arc<InMemoryTaskRepository>,
    pub service: TestPropagationService,
    pub ordering: Option<WorkflowOrdering>,
    pub story_id: Option<TaskId>,
    pub subtask_ids: Vec<TaskId>,
    pub pending_statuses: Vec<WorkflowStatus>,
    pub last_propagation_result: Option<StatusPropagationResult<PropagationOutcome>>,
    pub last_validation_result: Option<Result<WorkflowGraph, WorkflowConfigError>>,
}

impl WorkflowWorld {
    /// Creates a world with an empty repository and no workflow.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let service =
            StatusPropagationService::new(Arc::clone(&repository), PropagationConfig::default());

        Self {
            repository,
            service,
            ordering: None,
            story_id: None,
            subtask_ids: Vec::new(),
            pending_statuses: Vec::new(),
            last_propagation_result: None,
            last_validation_result: None,
        }
    }

    /// Returns the workflow ordering set up by a given step.
    ///
    /// # Errors
    ///
    /// Returns an error when no workflow was configured.
    pub fn ordering(&self) -> Result<&WorkflowOrdering, eyre::Report> {
        self.ordering
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing workflow ordering in scenario world"))
    }

    /// Returns the story created by a given step.
    ///
    /// # Errors
    ///
    /// Returns an error when no story was created.
    pub fn story_id(&self) -> Result<TaskId, eyre::Report> {
        self.story_id
            .ok_or_else(|| eyre::eyre!("missing story in scenario world"))
    }
}

impl Default for WorkflowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> WorkflowWorld {
    WorkflowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
