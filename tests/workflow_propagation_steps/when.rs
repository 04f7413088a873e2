//! When steps for workflow propagation BDD scenarios.

use super::world::{WorkflowWorld, run_async};
use eyre::WrapErr;
use nexus_workflow::{task::ports::TaskRepository, workflow::domain::WorkflowGraph};
use rstest_bdd_macros::when;

#[when("the story status is recomputed")]
fn recompute_story_status(world: &mut WorkflowWorld) -> Result<(), eyre::Report> {
    let story_id = world.story_id()?;
    let result = run_async(
        world
            .service
            .propagate_to_parent(world.ordering()?, story_id),
    );
    world.last_propagation_result = Some(result);
    Ok(())
}

#[when(r#"the last sub-task moves to "{status}""#)]
fn last_subtask_moves(world: &mut WorkflowWorld, status: String) -> Result<(), eyre::Report> {
    let subtask_id = *world
        .subtask_ids
        .last()
        .ok_or_else(|| eyre::eyre!("missing sub-task in scenario world"))?;

    run_async(world.repository.update_status(subtask_id, &status))
        .wrap_err("update sub-task status")?;
    let outcome = run_async(
        world
            .service
            .on_child_changed(world.ordering()?, subtask_id),
    )
    .wrap_err("propagate sub-task change")?;
    eyre::ensure!(outcome.is_some(), "sub-task has no parent");
    Ok(())
}

#[when("the story status is cascaded to its sub-tasks")]
fn cascade_story_status(world: &mut WorkflowWorld) -> Result<(), eyre::Report> {
    let story_id = world.story_id()?;
    run_async(
        world
            .service
            .cascade_to_children(world.ordering()?, story_id),
    )
    .wrap_err("cascade story status")?;
    Ok(())
}

#[when("the workflow is validated")]
fn validate_workflow(world: &mut WorkflowWorld) {
    let statuses = std::mem::take(&mut world.pending_statuses);
    world.last_validation_result = Some(WorkflowGraph::validate(statuses));
}
