//! Wagner-Fischer: fill the full edit distance grid.
//!
//! `d[i][j]` is the distance between `a[..i]` and `b[..j]`.
//! - `d[i][0] = i * del` and `d[0][j] = j * ins`.
//! - For `i, j > 0`, a match copies the diagonal neighbour for free, and
//!   otherwise the minimum over deleting `a[i-1]`, inserting `b[j-1]` and
//!   substituting is taken.
//!
//! The grid is filled row by row and is dropped once its bottom-right cell is read.
use std::cmp::min;
use std::ops::{Index, IndexMut};

use log::trace;
use pa_types::{Aligner, Cigar, Cost, Seq};
use serde::{Deserialize, Serialize};

use crate::{CostModel, DistanceError};

/// A row-major `rows x cols` grid of costs in a single allocation.
pub struct DistanceMatrix {
    cols: usize,
    cells: Vec<Cost>,
}

impl DistanceMatrix {
    /// Fails instead of aborting when the grid can not be allocated.
    pub fn new(rows: usize, cols: usize) -> Result<Self, DistanceError> {
        let too_large = DistanceError::MatrixTooLarge { rows, cols };
        let len = rows.checked_mul(cols).ok_or(too_large)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| too_large)?;
        cells.resize(len, 0);
        Ok(Self { cols, cells })
    }

    pub fn rows(&self) -> usize {
        if self.cols == 0 {
            0
        } else {
            self.cells.len() / self.cols
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}

impl Index<(usize, usize)> for DistanceMatrix {
    type Output = Cost;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &Cost {
        debug_assert!(j < self.cols);
        &self.cells[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for DistanceMatrix {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Cost {
        debug_assert!(j < self.cols);
        &mut self.cells[i * self.cols + j]
    }
}

/// Build the full `(|a|+1) x (|b|+1)` grid for `a` and `b`.
pub fn distance_matrix<T: PartialEq>(
    a: &[T],
    b: &[T],
    cm: &CostModel,
) -> Result<DistanceMatrix, DistanceError> {
    // All cells are bounded by the bottom-right boundary cells, so checking
    // this once means the additions below can not overflow.
    cm.max_distance(a.len(), b.len())?;

    let rows = a.len().checked_add(1);
    let cols = b.len().checked_add(1);
    let (Some(rows), Some(cols)) = (rows, cols) else {
        return Err(DistanceError::MatrixTooLarge {
            rows: a.len(),
            cols: b.len(),
        });
    };
    let mut d = DistanceMatrix::new(rows, cols)?;

    // Boundary: only deletions down the first column, only insertions along the first row.
    for i in 1..rows {
        d[(i, 0)] = d[(i - 1, 0)] + cm.del();
    }
    for j in 1..cols {
        d[(0, j)] = d[(0, j - 1)] + cm.ins();
    }

    for (i, ca) in (1..).zip(a) {
        for (j, cb) in (1..).zip(b) {
            d[(i, j)] = if ca == cb {
                d[(i - 1, j - 1)]
            } else {
                min(
                    min(d[(i - 1, j)] + cm.del(), d[(i, j - 1)] + cm.ins()),
                    // The substitution cost is not bounded by the indel costs.
                    d[(i - 1, j - 1)].saturating_add(cm.sub()),
                )
            };
        }
    }
    Ok(d)
}

/// The weighted edit distance between `a` and `b`, or an error when the grid
/// or the distance does not fit.
pub fn try_compute_edit_distance<T: PartialEq>(
    a: &[T],
    b: &[T],
    cm: &CostModel,
) -> Result<Cost, DistanceError> {
    let d = distance_matrix(a, b, cm)?;
    let distance = d[(a.len(), b.len())];
    trace!(
        "wagner-fischer |a|={} |b|={} cells={} distance={distance}",
        a.len(),
        b.len(),
        d.rows() * d.cols()
    );
    Ok(distance)
}

/// The weighted edit distance between `a` and `b`.
///
/// Panics when the `(|a|+1) x (|b|+1)` grid can not be allocated or the
/// distance overflows `Cost`. Use `try_compute_edit_distance` to handle these.
pub fn compute_edit_distance<T: PartialEq>(a: &[T], b: &[T], cm: &CostModel) -> Cost {
    match try_compute_edit_distance(a, b, cm) {
        Ok(d) => d,
        Err(e) => panic!("{e}"),
    }
}

/// Wagner-Fischer as a reusable `Aligner` with a fixed cost model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagnerFischer {
    pub cm: CostModel,
}

impl WagnerFischer {
    pub fn new(cm: CostModel) -> Self {
        Self { cm }
    }
}

impl Aligner for WagnerFischer {
    /// Only the cost is computed; no cigar is returned.
    fn align(&mut self, a: Seq, b: Seq) -> (Cost, Option<Cigar>) {
        (compute_edit_distance(a, b, &self.cm), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> CostModel {
        CostModel::unit()
    }

    #[test]
    fn boundary() {
        let cm = CostModel::new(2, 3, 5).unwrap();
        let d = distance_matrix(b"xyz", b"ab", &cm).unwrap();
        assert_eq!((d.rows(), d.cols()), (4, 3));
        for i in 0..4 {
            assert_eq!(d[(i, 0)], 3 * i as Cost);
        }
        for j in 0..3 {
            assert_eq!(d[(0, j)], 2 * j as Cost);
        }
    }

    #[test]
    fn empty() {
        let cm = CostModel::default();
        assert_eq!(compute_edit_distance::<u8>(b"", b"", &cm), 0);
        assert_eq!(compute_edit_distance(b"", b"abcd", &cm), 4);
        assert_eq!(compute_edit_distance(b"abcd", b"", &cm), 4);
        let cm = CostModel::new(3, 5, 1).unwrap();
        assert_eq!(compute_edit_distance(b"", b"abcd", &cm), 12);
        assert_eq!(compute_edit_distance(b"abcd", b"", &cm), 20);
    }

    #[test]
    fn single_element() {
        assert_eq!(compute_edit_distance(b"a", b"a", &unit()), 0);
        assert_eq!(compute_edit_distance(b"a", b"b", &unit()), 1);
        assert_eq!(compute_edit_distance(b"a", b"b", &CostModel::default()), 2);
        // Substitution more expensive than an indel pair.
        let cm = CostModel::new(1, 1, 5).unwrap();
        assert_eq!(compute_edit_distance(b"a", b"b", &cm), 2);
    }

    #[test]
    fn scenarios() {
        assert_eq!(compute_edit_distance(b"aebc", b"abde", &unit()), 3);
        assert_eq!(compute_edit_distance(b"aebc", b"abde", &CostModel::default()), 4);
        assert_eq!(compute_edit_distance(&[1, 2, 3], &[1, 2, 3, 4], &unit()), 1);
        assert_eq!(compute_edit_distance(&[1, 2, 3], &[1, 2, 4, 4], &unit()), 2);
        assert_eq!(compute_edit_distance(b"abc", b"abcd", &CostModel::default()), 1);
        assert_eq!(compute_edit_distance(b"kitten", b"sitting", &unit()), 3);
    }

    #[test]
    fn matches_are_free() {
        // Even with a zero or huge substitution cost, equal elements cost nothing.
        for sub in [0, 1, 7, Cost::MAX] {
            let cm = CostModel::new(4, 4, sub).unwrap();
            assert_eq!(compute_edit_distance(b"abcabc", b"abcabc", &cm), 0);
            assert_eq!(compute_edit_distance(b"xabc", b"yabc", &cm), sub.min(8));
        }
    }

    #[test]
    fn asymmetric_costs() {
        let cm = CostModel::new(1, 10, 100).unwrap();
        // Deleting the extra `c` is expensive, but there is no cheaper way.
        assert_eq!(compute_edit_distance(b"abc", b"ab", &cm), 10);
        assert_eq!(compute_edit_distance(b"ab", b"abc", &cm), 1);
    }

    #[test]
    fn generic_elements() {
        let a = ["fn", "main", "(", ")", "{", "}"];
        let b = ["fn", "test", "(", ")", "{", "}"];
        assert_eq!(compute_edit_distance(&a, &b, &unit()), 1);
        let a: Vec<char> = "straße".chars().collect();
        let b: Vec<char> = "strasse".chars().collect();
        assert_eq!(compute_edit_distance(&a, &b, &unit()), 2);
    }

    #[test]
    fn cost_overflow_is_reported() {
        let cm = CostModel::new(Cost::MAX, 1, 1).unwrap();
        assert_eq!(
            try_compute_edit_distance(b"a", b"ab", &cm),
            Err(DistanceError::CostOverflow { len_a: 1, len_b: 2 })
        );
        assert_eq!(try_compute_edit_distance(b"", b"b", &cm), Ok(Cost::MAX));
    }

    #[test]
    fn matrix_too_large() {
        assert_eq!(
            DistanceMatrix::new(usize::MAX, 2).err(),
            Some(DistanceError::MatrixTooLarge {
                rows: usize::MAX,
                cols: 2
            })
        );
    }

    #[test]
    fn aligner() {
        let mut wf = WagnerFischer::new(unit());
        assert_eq!(wf.align(b"ACGT", b"AGT"), (1, None));
    }
}
