//! In-memory integration tests for replacing a project's workflow while
//! tasks are stored.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::helpers::{graph, repository, seed_family, service_for};
use nexus_workflow::{
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{Task, TaskType},
        ports::TaskRepository,
    },
    workflow::domain::{
        WorkflowEditError, WorkflowGraph, WorkflowOrdering, WorkflowStatus, plan_workflow_edit,
    },
};
use rstest::rstest;

fn statuses_in_use(tasks: &[&Task]) -> BTreeSet<String> {
    tasks.iter().map(|task| task.status().to_owned()).collect()
}

fn release_workflow() -> Vec<WorkflowStatus> {
    vec![
        WorkflowStatus::new("Todo").as_default(),
        WorkflowStatus::new("In Progress").with_predecessors(["Todo"]),
        WorkflowStatus::new("QA").with_predecessors(["In Progress"]),
        WorkflowStatus::new("Released")
            .with_predecessors(["QA"])
            .as_done(),
    ]
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edited_workflow_drives_later_propagation(
    repository: Arc<InMemoryTaskRepository>,
    graph: WorkflowGraph,
) -> eyre::Result<()> {
    let (story, subtasks) = seed_family(
        &repository,
        TaskType::Story,
        "Todo",
        TaskType::SubTask,
        &["In Progress", "Todo"],
    )?;
    let mut tasks = vec![&story];
    tasks.extend(subtasks.iter());

    let edit = plan_workflow_edit(&graph, release_workflow(), statuses_in_use(&tasks))?;
    assert_eq!(edit.removed(), ["Done"]);
    let ordering = WorkflowOrdering::new(edit.graph())?;

    let pending = subtasks
        .get(1)
        .ok_or_else(|| eyre::eyre!("expected two seeded sub-tasks"))?;
    let service = service_for(&repository);
    repository.update_status(pending.id(), "QA").await?;
    let outcome = service.propagate_to_parent(&ordering, story.id()).await?;

    assert_eq!(outcome.status, "In Progress");
    Ok(())
}

#[rstest]
fn edit_dropping_a_used_status_is_refused(
    repository: Arc<InMemoryTaskRepository>,
    graph: WorkflowGraph,
) -> eyre::Result<()> {
    let (bug, subtasks) = seed_family(
        &repository,
        TaskType::Bug,
        "Done",
        TaskType::SubTask,
        &["Done"],
    )?;
    let mut tasks = vec![&bug];
    tasks.extend(subtasks.iter());

    let result = plan_workflow_edit(&graph, release_workflow(), statuses_in_use(&tasks));

    assert_eq!(
        result,
        Err(WorkflowEditError::StatusInUse(vec!["Done".to_owned()]))
    );
    Ok(())
}

#[rstest]
fn new_tasks_start_in_the_default_status(graph: WorkflowGraph) -> eyre::Result<()> {
    let edit = plan_workflow_edit(&graph, release_workflow(), ["Todo"])?;
    let replacement = edit.into_graph();

    assert_eq!(replacement.default_status(), "Todo");
    assert_eq!(replacement.done_statuses().collect::<Vec<_>>(), vec!["Released"]);
    Ok(())
}
