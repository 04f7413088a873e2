//! Validated workflow graphs.

use super::{WorkflowConfigError, WorkflowStatus};
use crate::workflow::TRACING_TARGET;
use std::collections::{HashMap, btree_set};

/// A project's status graph that passed every structural check.
///
/// Instances are only produced by [`WorkflowGraph::validate`] and are
/// immutable afterwards, so downstream components trust them without
/// re-validating. Statuses keep their declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowGraph {
    statuses: Vec<WorkflowStatus>,
    positions: HashMap<String, usize>,
    default_status: String,
}

impl WorkflowGraph {
    /// Validates a list of statuses into a workflow graph.
    ///
    /// Checks run in this order: non-empty input and non-blank names,
    /// unique names, known predecessors, exactly one default status without
    /// predecessors, at least one done status, and acyclicity.
    ///
    /// # Errors
    ///
    /// Returns the first [`WorkflowConfigError`] found.
    pub fn validate(statuses: Vec<WorkflowStatus>) -> Result<Self, WorkflowConfigError> {
        match check(&statuses) {
            Ok((positions, default_status)) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    status_count = statuses.len(),
                    default_status = %default_status,
                    "Workflow graph validated"
                );
                Ok(Self {
                    statuses,
                    positions,
                    default_status,
                })
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    status_count = statuses.len(),
                    error = %error,
                    "Rejected workflow configuration"
                );
                Err(error)
            }
        }
    }

    /// Returns the statuses in declaration order.
    #[must_use]
    pub fn statuses(&self) -> &[WorkflowStatus] {
        &self.statuses
    }

    /// Returns the number of statuses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Returns `true` when the graph has no statuses.
    ///
    /// Validation rejects empty workflows, so this is always `false`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Looks up a status by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&WorkflowStatus> {
        self.positions
            .get(name)
            .and_then(|position| self.statuses.get(*position))
    }

    /// Returns `true` when `name` is a status of this workflow.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Returns the entry status assigned to newly created tasks.
    #[must_use]
    pub fn default_status(&self) -> &str {
        &self.default_status
    }

    /// Returns the done status names in declaration order.
    pub fn done_statuses(&self) -> impl Iterator<Item = &str> {
        self.statuses
            .iter()
            .filter(|status| status.is_done())
            .map(WorkflowStatus::name)
    }

    /// Consumes the graph, returning its statuses for persistence.
    #[must_use]
    pub fn into_statuses(self) -> Vec<WorkflowStatus> {
        self.statuses
    }
}

/// Runs every validation rule, returning the name index and default status.
fn check(
    statuses: &[WorkflowStatus],
) -> Result<(HashMap<String, usize>, String), WorkflowConfigError> {
    let positions = index_statuses(statuses)?;
    check_predecessors_exist(statuses, &positions)?;
    let default_status = check_default_status(statuses)?;
    if !statuses.iter().any(WorkflowStatus::is_done) {
        return Err(WorkflowConfigError::NoDoneStatus);
    }
    if let Some(cycle) = find_cycle(statuses, &positions) {
        return Err(WorkflowConfigError::CyclicWorkflow(cycle));
    }
    Ok((positions, default_status))
}

fn index_statuses(
    statuses: &[WorkflowStatus],
) -> Result<HashMap<String, usize>, WorkflowConfigError> {
    if statuses.is_empty() {
        return Err(WorkflowConfigError::NoStatusProvided);
    }

    let mut positions = HashMap::with_capacity(statuses.len());
    for (position, status) in statuses.iter().enumerate() {
        if status.name().trim().is_empty() {
            return Err(WorkflowConfigError::EmptyStatusName);
        }
        if positions.insert(status.name().to_owned(), position).is_some() {
            return Err(WorkflowConfigError::DuplicateStatus(status.name().to_owned()));
        }
    }
    Ok(positions)
}

fn check_predecessors_exist(
    statuses: &[WorkflowStatus],
    positions: &HashMap<String, usize>,
) -> Result<(), WorkflowConfigError> {
    for status in statuses {
        if let Some(unknown) = status
            .predecessors()
            .iter()
            .find(|predecessor| !positions.contains_key(predecessor.as_str()))
        {
            return Err(WorkflowConfigError::UnknownPredecessor {
                status: status.name().to_owned(),
                predecessor: unknown.clone(),
            });
        }
    }
    Ok(())
}

fn check_default_status(statuses: &[WorkflowStatus]) -> Result<String, WorkflowConfigError> {
    let defaults: Vec<&WorkflowStatus> = statuses
        .iter()
        .filter(|status| status.is_default())
        .collect();

    match defaults.as_slice() {
        [] => Err(WorkflowConfigError::NoDefaultStatus),
        [single] if !single.predecessors().is_empty() => Err(
            WorkflowConfigError::DefaultStatusHasPredecessors(single.name().to_owned()),
        ),
        [single] => Ok(single.name().to_owned()),
        many => Err(WorkflowConfigError::MultipleDefaultStatus(
            many.iter().map(|status| status.name().to_owned()).collect(),
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Finished,
}

/// Depth-first search over predecessor edges, started from each status in
/// declaration order.
///
/// Returns the members of the first cycle found, listed in edge direction
/// (each status precedes the next, the last precedes the first) and rotated
/// to start at the earliest-declared member.
fn find_cycle(
    statuses: &[WorkflowStatus],
    positions: &HashMap<String, usize>,
) -> Option<Vec<String>> {
    let mut marks = vec![Mark::Unvisited; statuses.len()];

    let mut cycle = (0..statuses.len())
        .find_map(|start| walk_from(start, statuses, positions, &mut marks))?;

    // The walk follows predecessors, i.e. against edge direction.
    cycle.reverse();
    if let Some(earliest) = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, position)| **position)
        .map(|(offset, _)| offset)
    {
        cycle.rotate_left(earliest);
    }

    Some(
        cycle
            .into_iter()
            .filter_map(|position| statuses.get(position))
            .map(|status| status.name().to_owned())
            .collect(),
    )
}

/// One status on the current search path and the predecessors still to
/// explore from it.
struct Frame<'a> {
    node: usize,
    pending: btree_set::Iter<'a, String>,
}

/// Walks the predecessor chains reachable from `start` with an explicit
/// stack.
///
/// Returns the path segment that closes a cycle, in walk order.
fn walk_from<'a>(
    start: usize,
    statuses: &'a [WorkflowStatus],
    positions: &HashMap<String, usize>,
    marks: &mut [Mark],
) -> Option<Vec<usize>> {
    let mut path: Vec<Frame<'a>> = Vec::new();
    enter(start, statuses, marks, &mut path);

    while let Some(frame) = path.last_mut() {
        let current = frame.node;
        let Some(predecessor) = frame.pending.next() else {
            if let Some(mark) = marks.get_mut(current) {
                *mark = Mark::Finished;
            }
            path.pop();
            continue;
        };
        let Some(&next) = positions.get(predecessor.as_str()) else {
            continue;
        };
        match marks.get(next).copied() {
            Some(Mark::OnPath) => {
                let cycle_start = path.iter().position(|member| member.node == next)?;
                return Some(path.iter().skip(cycle_start).map(|member| member.node).collect());
            }
            Some(Mark::Unvisited) => enter(next, statuses, marks, &mut path),
            Some(Mark::Finished) | None => {}
        }
    }
    None
}

/// Pushes an unvisited status onto the search path.
fn enter<'a>(
    node: usize,
    statuses: &'a [WorkflowStatus],
    marks: &mut [Mark],
    path: &mut Vec<Frame<'a>>,
) {
    let (Some(mark), Some(status)) = (marks.get_mut(node), statuses.get(node)) else {
        return;
    };
    if *mark != Mark::Unvisited {
        return;
    }
    *mark = Mark::OnPath;
    path.push(Frame {
        node,
        pending: status.predecessors().iter(),
    });
}
