//! Shared test helpers for in-memory repository integration tests.

use std::sync::Arc;

use nexus_workflow::{
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{Task, TaskId, TaskType},
        ports::TaskRepositoryError,
    },
    workflow::{
        domain::{WorkflowGraph, WorkflowOrdering, default_workflow},
        services::{PropagationConfig, StatusPropagationService},
    },
};
use rstest::fixture;

/// Propagation service backed by the in-memory repository.
pub type TestService = StatusPropagationService<InMemoryTaskRepository>;

/// Provides a fresh in-memory repository for each test.
#[fixture]
pub fn repository() -> Arc<InMemoryTaskRepository> {
    Arc::new(InMemoryTaskRepository::new())
}

/// Provides the validated default workflow.
#[fixture]
pub fn graph() -> WorkflowGraph {
    WorkflowGraph::validate(default_workflow()).expect("default workflow is valid")
}

/// Provides the ordering of the default workflow.
#[fixture]
pub fn ordering(graph: WorkflowGraph) -> WorkflowOrdering {
    WorkflowOrdering::new(&graph).expect("default workflow orders")
}

/// Creates a propagation service over `repository` with default settings.
pub fn service_for(repository: &Arc<InMemoryTaskRepository>) -> TestService {
    StatusPropagationService::new(Arc::clone(repository), PropagationConfig::default())
}

/// Stores a parent task with one child per status and returns them.
///
/// # Errors
///
/// Returns an error if any task cannot be stored.
pub fn seed_family(
    repository: &InMemoryTaskRepository,
    parent_type: TaskType,
    parent_status: &str,
    child_type: TaskType,
    child_statuses: &[&str],
) -> Result<(Task, Vec<Task>), TaskRepositoryError> {
    let parent = Task::new(TaskId::new(), parent_type, parent_status);
    repository.insert(parent.clone())?;

    let mut children = Vec::with_capacity(child_statuses.len());
    for status in child_statuses {
        let child = Task::new(TaskId::new(), child_type, *status).with_parent(parent.id());
        repository.insert(child.clone())?;
        children.push(child);
    }
    Ok((parent, children))
}
