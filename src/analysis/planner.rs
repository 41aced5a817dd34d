use crate::error::ValidationError;
use crate::function::FunctionDefinition;
use crate::id::StatementId;
use ahash::AHashMap;
use std::collections::VecDeque;
use tracing::{trace, warn};

/// Orders the statements of a function so that every flow edge points forward.
///
/// This is the only place where acyclicity is checked: mutations on the
/// function accept any edge whose endpoints exist, and a cycle surfaces here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutionPlanner;

impl ExecutionPlanner {
    /// Kahn's algorithm over the function's flow edges.
    ///
    /// The ready queue is seeded and drained in statement insertion order, so
    /// independent statements keep the order they were added in. Edges whose
    /// endpoints are not both present are skipped.
    pub fn topo_order(function: &FunctionDefinition) -> Result<Vec<StatementId>, ValidationError> {
        let mut in_degree: AHashMap<&StatementId, usize> = function
            .statements()
            .map(|statement| (statement.id(), 0))
            .collect();
        let mut successors: AHashMap<&StatementId, Vec<&StatementId>> = AHashMap::new();

        for edge in function.edges() {
            if !in_degree.contains_key(&edge.from) || !in_degree.contains_key(&edge.to) {
                continue;
            }
            successors.entry(&edge.from).or_default().push(&edge.to);
            if let Some(degree) = in_degree.get_mut(&edge.to) {
                *degree += 1;
            }
        }

        let mut queue: VecDeque<&StatementId> = function
            .statements()
            .map(|statement| statement.id())
            .filter(|id| in_degree.get(id).copied() == Some(0))
            .collect();
        let mut order = Vec::with_capacity(in_degree.len());

        while let Some(id) = queue.pop_front() {
            order.push(id.clone());
            let Some(next) = successors.get(id) else {
                continue;
            };
            for &target in next {
                if let Some(degree) = in_degree.get_mut(target) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(target);
                    }
                }
            }
        }

        if order.len() < function.statement_count() {
            let remaining: Vec<StatementId> = function
                .statements()
                .map(|statement| statement.id())
                .filter(|id| in_degree.get(id).copied().unwrap_or(0) > 0)
                .cloned()
                .collect();
            warn!(function = %function.id(), remaining = remaining.len(), "flow graph has a cycle");
            return Err(ValidationError::Cycle { remaining });
        }

        trace!(function = %function.id(), statements = order.len(), "execution plan ready");
        Ok(order)
    }
}
