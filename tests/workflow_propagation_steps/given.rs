//! Given steps for workflow propagation BDD scenarios.

use super::world::WorkflowWorld;
use eyre::WrapErr;
use nexus_workflow::{
    task::domain::{Task, TaskId, TaskType},
    workflow::domain::{WorkflowGraph, WorkflowOrdering, WorkflowStatus, default_workflow},
};
use rstest_bdd_macros::given;

#[given("a project using the default workflow")]
fn default_workflow_project(world: &mut WorkflowWorld) -> Result<(), eyre::Report> {
    let graph = WorkflowGraph::validate(default_workflow())
        .wrap_err("validate default workflow for scenario")?;
    world.ordering = Some(WorkflowOrdering::new(&graph).wrap_err("order default workflow")?);
    Ok(())
}

#[given(r#"a story in status "{status}""#)]
fn story_in_status(world: &mut WorkflowWorld, status: String) -> Result<(), eyre::Report> {
    let story = Task::new(TaskId::new(), TaskType::Story, status);
    world
        .repository
        .insert(story.clone())
        .wrap_err("store scenario story")?;
    world.story_id = Some(story.id());
    Ok(())
}

#[given(r#"the story has a sub-task in status "{status}""#)]
fn story_has_subtask(world: &mut WorkflowWorld, status: String) -> Result<(), eyre::Report> {
    let story_id = world.story_id()?;
    let subtask = Task::new(TaskId::new(), TaskType::SubTask, status).with_parent(story_id);
    world
        .repository
        .insert(subtask.clone())
        .wrap_err("store scenario sub-task")?;
    world.subtask_ids.push(subtask.id());
    Ok(())
}

#[given("a workflow where A follows C, B follows A and C follows B")]
fn cyclic_workflow(world: &mut WorkflowWorld) {
    world.pending_statuses = vec![
        WorkflowStatus::new("Todo").as_default(),
        WorkflowStatus::new("A").with_predecessors(["Todo", "C"]),
        WorkflowStatus::new("B").with_predecessors(["A"]),
        WorkflowStatus::new("C").with_predecessors(["B"]),
        WorkflowStatus::new("Done").with_predecessors(["C"]).as_done(),
    ];
}
