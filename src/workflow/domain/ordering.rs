//! Deterministic topological ordering of workflow statuses.

use super::{OrderingError, WorkflowGraph, WorkflowStatus};
use crate::workflow::TRACING_TARGET;
use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};

/// Total progress order over a workflow's statuses.
///
/// Every predecessor appears before its dependents. Position `0` is the
/// least advanced status; the highest position is the most advanced. Ties
/// between statuses that become ready at the same time are broken by
/// declaration order, so the same graph always yields the same sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowOrdering {
    statuses: Vec<String>,
    positions: HashMap<String, usize>,
}

impl WorkflowOrdering {
    /// Orders a validated workflow graph.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::OrderingIncomplete`] if not every status
    /// could be ordered. Validation rules this out, so the error signals a
    /// programming defect rather than a configuration problem.
    pub fn new(graph: &WorkflowGraph) -> Result<Self, OrderingError> {
        Self::from_statuses(graph.statuses())
    }

    /// Orders raw statuses with Kahn's algorithm.
    pub(crate) fn from_statuses(statuses: &[WorkflowStatus]) -> Result<Self, OrderingError> {
        let order = match kahn_order(statuses) {
            Ok(order) => order,
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Workflow ordering left statuses unplaced"
                );
                return Err(error);
            }
        };

        let ordered: Vec<String> = order
            .into_iter()
            .filter_map(|position| statuses.get(position))
            .map(|status| status.name().to_owned())
            .collect();
        let positions = ordered
            .iter()
            .enumerate()
            .map(|(position, name)| (name.clone(), position))
            .collect();

        tracing::debug!(
            target: TRACING_TARGET,
            order = ?ordered,
            "Workflow ordered"
        );
        Ok(Self {
            statuses: ordered,
            positions,
        })
    }

    /// Returns the status names from least to most advanced.
    #[must_use]
    pub fn statuses(&self) -> &[String] {
        &self.statuses
    }

    /// Returns the number of ordered statuses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Returns `true` when no status is ordered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Returns the progress position of a status.
    #[must_use]
    pub fn position(&self, status: &str) -> Option<usize> {
        self.positions.get(status).copied()
    }

    /// Returns the status at a progress position.
    #[must_use]
    pub fn status_at(&self, position: usize) -> Option<&str> {
        self.statuses.get(position).map(String::as_str)
    }

    /// Compares the progress of two statuses.
    ///
    /// Returns `None` when either status is not part of the ordering.
    #[must_use]
    pub fn compare(&self, left: &str, right: &str) -> Option<Ordering> {
        Some(self.position(left)?.cmp(&self.position(right)?))
    }
}

/// Returns declaration positions in topological order.
///
/// The ready queue is seeded and extended in declaration order; the name map
/// is only used for lookups, never for iteration.
fn kahn_order(statuses: &[WorkflowStatus]) -> Result<Vec<usize>, OrderingError> {
    let positions: HashMap<&str, usize> = statuses
        .iter()
        .enumerate()
        .map(|(position, status)| (status.name(), position))
        .collect();

    let mut in_degree = vec![0_usize; statuses.len()];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); statuses.len()];
    for (position, status) in statuses.iter().enumerate() {
        for predecessor in status.predecessors() {
            if let Some(degree) = in_degree.get_mut(position) {
                *degree = degree.saturating_add(1);
            }
            // Unknown predecessors keep the degree raised, so the status is
            // never placed and the length check below reports it.
            if let Some(edges) = positions
                .get(predecessor.as_str())
                .and_then(|from| successors.get_mut(*from))
            {
                edges.push(position);
            }
        }
    }

    let mut ready: VecDeque<usize> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, degree)| **degree == 0)
        .map(|(position, _)| position)
        .collect();
    let mut order = Vec::with_capacity(statuses.len());

    while let Some(current) = ready.pop_front() {
        order.push(current);
        let next_statuses = successors.get(current).map(Vec::as_slice).unwrap_or_default();
        for &next in next_statuses {
            if let Some(degree) = in_degree.get_mut(next) {
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    ready.push_back(next);
                }
            }
        }
    }

    if order.len() == statuses.len() {
        Ok(order)
    } else {
        Err(OrderingError::OrderingIncomplete {
            ordered: order.len(),
            expected: statuses.len(),
        })
    }
}
