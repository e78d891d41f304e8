// src/instance/graph.rs

use crate::types::OperationId;

/// Per-operation predecessor lists.
///
/// The job chain (`(j, k - 1) -> (j, k)`) is implicit and not stored; only
/// the extra cross-job edges from `after = [...]` live here. Acyclicity is
/// checked once in `instance::validate`, so this is just adjacency.
#[derive(Debug, Clone, Default)]
pub struct PrecedenceGraph {
    /// `after[job][index]` = extra predecessors of that operation.
    after: Vec<Vec<Vec<OperationId>>>,
}

impl PrecedenceGraph {
    pub fn new(after: Vec<Vec<Vec<OperationId>>>) -> Self {
        Self { after }
    }

    /// Extra (cross-job) predecessors of `op`.
    pub fn extra_predecessors_of(&self, op: OperationId) -> &[OperationId] {
        self.after
            .get(op.job)
            .and_then(|ops| ops.get(op.index))
            .map(|deps| deps.as_slice())
            .unwrap_or(&[])
    }

    /// All predecessors of `op`: its job predecessor (if any) followed by the
    /// extra ones.
    pub fn predecessors_of(&self, op: OperationId) -> Vec<OperationId> {
        let mut preds = Vec::new();
        if op.index > 0 {
            preds.push(OperationId::new(op.job, op.index - 1));
        }
        preds.extend_from_slice(self.extra_predecessors_of(op));
        preds
    }

    /// Whether any cross-job edge exists at all.
    pub fn has_extra_edges(&self) -> bool {
        self.after.iter().flatten().any(|deps| !deps.is_empty())
    }
}
