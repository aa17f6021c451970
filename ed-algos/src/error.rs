use pa_types::Cost;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostModelError {
    #[error("{op} cost must be non-negative, got {cost}")]
    Negative { op: &'static str, cost: Cost },
}

/// Inputs for which a distance can not be computed.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceError {
    #[error("a distance matrix of {rows}x{cols} cells does not fit in memory")]
    MatrixTooLarge { rows: usize, cols: usize },
    #[error("the worst case distance for lengths {len_a} and {len_b} overflows the cost type")]
    CostOverflow { len_a: usize, len_b: usize },
    #[error("sequences of lengths {len_a} and {len_b} exceed the diagonal index range")]
    SequenceTooLong { len_a: usize, len_b: usize },
}
