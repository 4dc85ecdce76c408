//! Validated, read-only travel cost matrix.
//!
//! Costs are whole distance units (metres for road distances). The matrix is
//! square and non-empty but need not be symmetric: `cost(a, b)` and
//! `cost(b, a)` may differ.
//!
//! The sum of every entry must fit in a [`Cost`]. A tour never uses a
//! directed edge twice, so no tour cost, partial or complete, can overflow,
//! and the solvers' comparisons stay exact.

use thiserror::Error;

use crate::NodeIndex;

/// Travel cost between two nodes.
///
/// Matrices whose entries sum past `Cost::MAX` are rejected with
/// [`MatrixError::CostOverflow`]; sums over out-of-range edges saturate.
pub type Cost = u64;

/// Errors raised while building a [`DistanceMatrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The matrix had no rows.
    #[error("distance matrix must contain at least one row")]
    Empty,
    /// A row had the wrong number of columns.
    #[error("distance matrix row {row} has {found} columns, expected {expected}")]
    NotSquare {
        /// Offending row.
        row: NodeIndex,
        /// Number of rows, which every row length must match.
        expected: usize,
        /// Actual row length.
        found: usize,
    },
    /// A cost was negative.
    #[error("distance matrix entry ({row}, {column}) is negative")]
    NegativeEntry {
        /// Row of the entry.
        row: NodeIndex,
        /// Column of the entry.
        column: NodeIndex,
    },
    /// A cost was NaN or infinite.
    #[error("distance matrix entry ({row}, {column}) is not a finite number")]
    NonFiniteEntry {
        /// Row of the entry.
        row: NodeIndex,
        /// Column of the entry.
        column: NodeIndex,
    },
    /// The entries sum past `Cost::MAX`.
    #[error("distance matrix entries sum past the largest representable cost")]
    CostOverflow,
}

/// Square matrix of directed travel costs.
///
/// # Examples
/// ```
/// use tourplan_core::DistanceMatrix;
///
/// # fn main() -> Result<(), tourplan_core::MatrixError> {
/// let matrix = DistanceMatrix::new(vec![vec![0, 7], vec![9, 0]])?;
/// assert_eq!(matrix.cost(0, 1), Some(7));
/// assert_eq!(matrix.cost(1, 0), Some(9));
/// assert_eq!(matrix.cost(2, 0), None);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Vec<Cost>>", into = "Vec<Vec<Cost>>")
)]
pub struct DistanceMatrix {
    size: usize,
    costs: Vec<Cost>,
}

impl DistanceMatrix {
    /// Validates and constructs a matrix from integer rows.
    ///
    /// # Errors
    /// Returns [`MatrixError::Empty`] for no rows,
    /// [`MatrixError::NotSquare`] when a row length differs from the row
    /// count, and [`MatrixError::CostOverflow`] when the entries sum past
    /// `Cost::MAX`.
    pub fn new(rows: Vec<Vec<Cost>>) -> Result<Self, MatrixError> {
        let size = check_shape(&rows)?;
        let costs: Vec<Cost> = rows.into_iter().flatten().collect();
        check_total(&costs)?;
        Ok(Self { size, costs })
    }

    /// Validates real-valued rows and rounds each cost to the nearest unit.
    ///
    /// Providers frequently report distances as floating-point numbers; this
    /// constructor rejects negative and non-finite entries before they can
    /// reach a solver.
    ///
    /// # Errors
    /// Returns the shape errors of [`DistanceMatrix::new`],
    /// [`MatrixError::NonFiniteEntry`] for NaN or infinite entries,
    /// [`MatrixError::NegativeEntry`] for negative ones and
    /// [`MatrixError::CostOverflow`] when the rounded entries sum past
    /// `Cost::MAX`.
    ///
    /// # Examples
    /// ```
    /// use tourplan_core::{DistanceMatrix, MatrixError};
    ///
    /// let matrix = DistanceMatrix::try_from_real(vec![vec![0.0, 2.6], vec![3.2, 0.0]])
    ///     .expect("finite, non-negative rows");
    /// assert_eq!(matrix.cost(0, 1), Some(3));
    ///
    /// let err = DistanceMatrix::try_from_real(vec![vec![0.0, -1.0], vec![1.0, 0.0]]);
    /// assert_eq!(err, Err(MatrixError::NegativeEntry { row: 0, column: 1 }));
    /// ```
    pub fn try_from_real(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let size = check_shape(&rows)?;
        let mut costs = Vec::with_capacity(size.saturating_mul(size));
        for (row, values) in rows.iter().enumerate() {
            for (column, value) in values.iter().enumerate() {
                if !value.is_finite() {
                    return Err(MatrixError::NonFiniteEntry { row, column });
                }
                if *value < 0.0 {
                    return Err(MatrixError::NegativeEntry { row, column });
                }
                costs.push(round_cost(*value));
            }
        }
        check_total(&costs)?;
        Ok(Self { size, costs })
    }

    /// Number of nodes covered by the matrix.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Always `false`; construction rejects empty matrices.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Whether `node` indexes a row of this matrix.
    #[must_use]
    pub const fn contains(&self, node: NodeIndex) -> bool {
        node < self.size
    }

    /// Cost of travelling from `from` to `to`, or `None` when out of range.
    #[must_use]
    pub fn cost(&self, from: NodeIndex, to: NodeIndex) -> Option<Cost> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.costs.get(from * self.size + to).copied()
    }

    /// Cost of an edge the caller has already range-checked.
    ///
    /// Out-of-range edges cost [`Cost::MAX`] so a bad index can never make a
    /// tour look cheaper.
    #[must_use]
    pub fn edge(&self, from: NodeIndex, to: NodeIndex) -> Cost {
        self.cost(from, to).unwrap_or(Cost::MAX)
    }

    /// Total cost of walking `path` in order, saturating on overflow.
    ///
    /// # Examples
    /// ```
    /// use tourplan_core::DistanceMatrix;
    ///
    /// let matrix = DistanceMatrix::new(vec![
    ///     vec![0, 10, 15],
    ///     vec![10, 0, 5],
    ///     vec![15, 5, 0],
    /// ])
    /// .expect("square matrix");
    /// assert_eq!(matrix.path_cost(&[0, 1, 2, 0]), 30);
    /// ```
    #[must_use]
    pub fn path_cost(&self, path: &[NodeIndex]) -> Cost {
        path.windows(2)
            .map(|pair| match pair {
                [from, to] => self.edge(*from, *to),
                _ => 0,
            })
            .fold(0, Cost::saturating_add)
    }

    /// Whether `cost(a, b) == cost(b, a)` for every pair.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|a| (a..self.size).all(|b| self.cost(a, b) == self.cost(b, a)))
    }

    /// Copy the matrix back into nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<Cost>> {
        self.costs
            .chunks(self.size.max(1))
            .map(<[Cost]>::to_vec)
            .collect()
    }
}

impl TryFrom<Vec<Vec<Cost>>> for DistanceMatrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<Cost>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<DistanceMatrix> for Vec<Vec<Cost>> {
    fn from(matrix: DistanceMatrix) -> Self {
        matrix.to_rows()
    }
}

fn check_shape<T>(rows: &[Vec<T>]) -> Result<usize, MatrixError> {
    let size = rows.len();
    if size == 0 {
        return Err(MatrixError::Empty);
    }
    if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
        return Err(MatrixError::NotSquare {
            row,
            expected: size,
            found: values.len(),
        });
    }
    Ok(size)
}

fn check_total(costs: &[Cost]) -> Result<(), MatrixError> {
    costs
        .iter()
        .try_fold(0, |total: Cost, cost| total.checked_add(*cost))
        .map(|_| ())
        .ok_or(MatrixError::CostOverflow)
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "input is checked finite and non-negative; `as` saturates above u64::MAX"
)]
fn round_cost(value: f64) -> Cost {
    value.round() as Cost
}
