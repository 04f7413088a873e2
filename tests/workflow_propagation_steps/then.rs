//! Then steps for workflow propagation BDD scenarios.

use super::world::{WorkflowWorld, run_async};
use nexus_workflow::{
    task::{domain::TaskId, ports::TaskRepository},
    workflow::{
        domain::{PropagationError, WorkflowConfigError},
        services::StatusPropagationError,
    },
};
use rstest_bdd_macros::then;

fn stored_status(world: &WorkflowWorld, id: TaskId) -> Result<String, eyre::Report> {
    let task = run_async(world.repository.find_by_id(id))?
        .ok_or_else(|| eyre::eyre!("task {id} missing from repository"))?;
    Ok(task.status().to_owned())
}

#[then(r#"the story status is "{status}""#)]
fn story_status_is(world: &WorkflowWorld, status: String) -> Result<(), eyre::Report> {
    let actual = stored_status(world, world.story_id()?)?;
    eyre::ensure!(
        actual == status,
        "expected story status {status}, found {actual}"
    );
    Ok(())
}

#[then(r#"every sub-task is in status "{status}""#)]
fn every_subtask_in_status(world: &WorkflowWorld, status: String) -> Result<(), eyre::Report> {
    eyre::ensure!(!world.subtask_ids.is_empty(), "scenario has no sub-tasks");
    for id in &world.subtask_ids {
        let actual = stored_status(world, *id)?;
        eyre::ensure!(
            actual == status,
            "expected sub-task {id} in status {status}, found {actual}"
        );
    }
    Ok(())
}

#[then("propagation fails with an unknown status error")]
fn propagation_fails_with_unknown_status(world: &WorkflowWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_propagation_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing propagation result"))?;

    if !matches!(
        result,
        Err(StatusPropagationError::Propagation(
            PropagationError::UnknownTaskStatus { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected UnknownTaskStatus error, got {result:?}"
        ));
    }

    Ok(())
}

#[then(r#"validation fails with the cycle "{cycle}""#)]
fn validation_fails_with_cycle(world: &WorkflowWorld, cycle: String) -> Result<(), eyre::Report> {
    let result = world
        .last_validation_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing validation result"))?;

    let Err(WorkflowConfigError::CyclicWorkflow(members)) = result else {
        return Err(eyre::eyre!("expected CyclicWorkflow error, got {result:?}"));
    };
    let actual = members.join(" -> ");
    eyre::ensure!(actual == cycle, "expected cycle {cycle}, found {actual}");
    Ok(())
}
