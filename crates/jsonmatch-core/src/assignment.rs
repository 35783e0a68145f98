//! Linear sum assignment over square float cost matrices.
//!
//! Wraps `pathfinding`'s Kuhn–Munkres implementation behind the
//! `solve(matrix) → permutation | NonOptimal` interface the matching engine
//! expects. The solver needs `Ord` weights, so costs are scaled to `i64`
//! at millicost resolution before solving; the caller keeps thresholding on
//! the original `f64` values.
//!
//! Non-square inputs are the caller's responsibility: the engine always
//! pads to `max(p, t) × max(p, t)` with [`MAX_COST`](crate::cost::MAX_COST)
//! so every instance is square and feasible.

use std::fmt;

use pathfinding::kuhn_munkres::{kuhn_munkres_min, Weights};

/// Cost quantization factor: three decimal digits survive the scaling.
const SCALE: f64 = 1_000.0;

/// A dense square matrix of edit costs.
#[derive(Debug, Clone)]
pub struct CostMatrix {
    n: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Creates an `n × n` matrix with every entry set to `fill`.
    pub fn filled(n: usize, fill: f64) -> Self {
        Self {
            n,
            data: vec![fill; n * n],
        }
    }

    /// Side length.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns `true` for the degenerate `0 × 0` matrix.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Entry at `(row, col)`.
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n + col]
    }

    /// Overwrites the entry at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.n + col] = value;
    }
}

/// Failure to produce a provably optimal assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    /// The instance was rejected before solving (non-finite entries would
    /// make the scaled weights meaningless).
    NonOptimal,
}

impl fmt::Display for AssignmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonOptimal => f.write_str("assignment solver returned a non-optimal status"),
        }
    }
}

impl std::error::Error for AssignmentError {}

/// `Weights` adapter over the scaled matrix.
struct ScaledWeights {
    n: usize,
    data: Vec<i64>,
}

impl Weights<i64> for ScaledWeights {
    fn rows(&self) -> usize {
        self.n
    }

    fn columns(&self) -> usize {
        self.n
    }

    fn at(&self, row: usize, col: usize) -> i64 {
        self.data[row * self.n + col]
    }

    fn neg(&self) -> Self {
        Self {
            n: self.n,
            data: self.data.iter().map(|&v| -v).collect(),
        }
    }
}

/// Solves the minimum-cost assignment for `matrix`.
///
/// Returns `perm` with `perm[row] = col`. The empty matrix yields an empty
/// permutation.
///
/// # Errors
///
/// [`AssignmentError::NonOptimal`] when any entry is non-finite.
pub fn solve(matrix: &CostMatrix) -> Result<Vec<usize>, AssignmentError> {
    if matrix.is_empty() {
        return Ok(Vec::new());
    }
    if matrix.data.iter().any(|c| !c.is_finite()) {
        return Err(AssignmentError::NonOptimal);
    }

    let scaled = ScaledWeights {
        n: matrix.n,
        data: matrix
            .data
            .iter()
            .map(|&c| (c * SCALE).round() as i64)
            .collect(),
    };
    let (_, assignment) = kuhn_munkres_min(&scaled);
    Ok(assignment)
}
