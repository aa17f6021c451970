//! Greedy diagonal search for the unit cost indel distance, following Myers'
//! O(ND) algorithm in the `p`-layered form of Wu, Manber, Myers and Miller.
//!
//! Terminology and notation:
//! - `a` is the shorter sequence with length `m`, `b` the longer one with length `n`.
//! - `x` indexes `a`, `y` indexes `b`.
//! - `k = y - x`: the diagonal. The end `(m, n)` lies on diagonal `delta = n - m`.
//! - `fp[k]`: the furthest `y` reached on diagonal `k` so far, or `-1`.
//! - `p`: the layer. Any path to diagonal `delta` in layer `p` uses `p`
//!   insertions or deletions more than the `delta` that are needed anyway,
//!   so its cost is `delta + 2p`.
//! - Snake: the run of matches followed from a point along its diagonal.
//!
//! Each layer first extends diagonals `-p..delta` upwards, then
//! `delta+p..delta` downwards, and finally `delta` itself, so that every
//! diagonal reads neighbours that were already updated in the current layer.
use std::cmp::max;
use std::ops::{Index, IndexMut};

use log::trace;
use pa_types::{Aligner, Cigar, Cost, Seq};
use serde::{Deserialize, Serialize};

use crate::DistanceError;

/// The type for furthest reaching points and diagonal indices.
pub type Fr = i32;

/// The `fp` array, indexed by diagonal.
///
/// Diagonals `-(m+1)..=n+1` map to the fixed buffer `0..m+n+3`, which covers
/// every neighbour read by the search without bounds checks on `k`.
struct FurthestReach {
    fp: Vec<Fr>,
    offset: Fr,
}

impl FurthestReach {
    fn new(m: Fr, n: Fr) -> Self {
        Self {
            fp: vec![-1; (m + n + 3) as usize],
            offset: m + 1,
        }
    }

    /// Move diagonal `k` to the furthest of its two predecessors, and extend it.
    #[inline]
    fn update<T: PartialEq>(&mut self, k: Fr, a: &[T], b: &[T], m: Fr, n: Fr) {
        let y = max(self[k - 1] + 1, self[k + 1]);
        self[k] = snake(k, y, a, b, m, n);
    }
}

impl Index<Fr> for FurthestReach {
    type Output = Fr;

    #[inline]
    fn index(&self, k: Fr) -> &Fr {
        &self.fp[(k + self.offset) as usize]
    }
}

impl IndexMut<Fr> for FurthestReach {
    #[inline]
    fn index_mut(&mut self, k: Fr) -> &mut Fr {
        &mut self.fp[(k + self.offset) as usize]
    }
}

/// Follow matching elements along diagonal `k`, starting at `y`.
/// Returns the `y` of the first mismatch, or of the end of either sequence.
///
/// `a` has length `m` and `b` length `n`.
pub fn snake<T: PartialEq>(k: Fr, mut y: Fr, a: &[T], b: &[T], m: Fr, n: Fr) -> Fr {
    let mut x = y - k;
    debug_assert!(x >= 0 && y >= 0, "snake starts outside the grid: x={x} y={y}");
    while x < m && y < n && a[x as usize] == b[y as usize] {
        x += 1;
        y += 1;
    }
    y
}

/// The indel distance between `a` and `b`, or an error when the lengths do
/// not fit the diagonal indices.
pub fn try_compute_greedy_edit_distance<T: PartialEq>(
    a: &[T],
    b: &[T],
) -> Result<Cost, DistanceError> {
    let fits = a
        .len()
        .checked_add(b.len())
        .and_then(|s| s.checked_add(3))
        .is_some_and(|s| Fr::try_from(s).is_ok());
    if !fits {
        return Err(DistanceError::SequenceTooLong {
            len_a: a.len(),
            len_b: b.len(),
        });
    }

    // Make `a` the shorter sequence.
    let (a, b) = if a.len() > b.len() { (b, a) } else { (a, b) };
    let m = a.len() as Fr;
    let n = b.len() as Fr;
    let delta = n - m;

    let mut fp = FurthestReach::new(m, n);
    let mut p: Fr = 0;
    loop {
        for k in -p..delta {
            fp.update(k, a, b, m, n);
        }
        for k in (delta + 1..=delta + p).rev() {
            fp.update(k, a, b, m, n);
        }
        fp.update(delta, a, b, m, n);

        if fp[delta] >= n {
            let distance = delta + 2 * p;
            trace!("myers m={m} n={n} layers={} distance={distance}", p + 1);
            return Ok(distance as Cost);
        }
        p += 1;
    }
}

/// The minimal number of insertions and deletions needed to turn `a` into `b`.
/// A substitution counts as one deletion plus one insertion.
///
/// Panics when `|a| + |b|` exceeds the range of `Fr`.
/// Use `try_compute_greedy_edit_distance` to handle this.
pub fn compute_greedy_edit_distance<T: PartialEq>(a: &[T], b: &[T]) -> Cost {
    match try_compute_greedy_edit_distance(a, b) {
        Ok(d) => d,
        Err(e) => panic!("{e}"),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Myers;

impl Aligner for Myers {
    fn align(&mut self, a: Seq, b: Seq) -> (Cost, Option<Cigar>) {
        (compute_greedy_edit_distance(a, b), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_follows_matches() {
        let a = b"abcx";
        let b = b"zabcy";
        // Diagonal 1 starting at (0, 1) matches `abc`.
        assert_eq!(snake(1, 1, a, b, 4, 5), 4);
        // Diagonal 0 mismatches immediately.
        assert_eq!(snake(0, 0, a, b, 4, 5), 0);
        // Starting halfway the run.
        assert_eq!(snake(1, 2, a, b, 4, 5), 4);
    }

    #[test]
    fn snake_stops_at_ends() {
        let a = b"ab";
        let b = b"abab";
        // Runs out of `a`.
        assert_eq!(snake(0, 0, a, b, 2, 4), 2);
        assert_eq!(snake(2, 2, a, b, 2, 4), 4);
        // Already at the end of `b`.
        assert_eq!(snake(2, 4, a, b, 2, 4), 4);
        // Empty sequences.
        assert_eq!(snake::<u8>(0, 0, &[], &[], 0, 0), 0);
    }

    #[test]
    fn empty() {
        assert_eq!(compute_greedy_edit_distance::<u8>(b"", b""), 0);
        assert_eq!(compute_greedy_edit_distance(b"", b"abcd"), 4);
        assert_eq!(compute_greedy_edit_distance(b"abcd", b""), 4);
    }

    #[test]
    fn single_element() {
        assert_eq!(compute_greedy_edit_distance(b"a", b"a"), 0);
        assert_eq!(compute_greedy_edit_distance(b"a", b"b"), 2);
        assert_eq!(compute_greedy_edit_distance(b"a", b"ba"), 1);
        assert_eq!(compute_greedy_edit_distance(b"ab", b"b"), 1);
    }

    #[test]
    fn scenarios() {
        assert_eq!(compute_greedy_edit_distance(&[1, 2, 3], &[1, 2, 3, 4]), 1);
        // Replacing the 3 by a 4 costs a deletion and an insertion.
        assert_eq!(compute_greedy_edit_distance(&[1, 2, 3], &[1, 2, 4, 4]), 3);
        assert_eq!(compute_greedy_edit_distance(b"abc", b"xyz"), 6);
        assert_eq!(compute_greedy_edit_distance(b"aebc", b"abde"), 4);
        assert_eq!(compute_greedy_edit_distance(b"abc", b"abcd"), 1);
    }

    #[test]
    fn symmetric() {
        let pairs: [(&[u8], &[u8]); 4] = [
            (b"ACGTTGCA", b"ACTTGGCA"),
            (b"AAAA", b"AAAAAAAA"),
            (b"GATTACA", b"TACA"),
            (b"x", b"yyyyyyx"),
        ];
        for (a, b) in pairs {
            assert_eq!(
                compute_greedy_edit_distance(a, b),
                compute_greedy_edit_distance(b, a)
            );
        }
    }

    #[test]
    fn edits_at_the_ends() {
        // Only the prefix differs: the first layer snakes through the rest.
        assert_eq!(compute_greedy_edit_distance(b"XXabcdef", b"abcdef"), 2);
        assert_eq!(compute_greedy_edit_distance(b"abcdef", b"abcdefYY"), 2);
        assert_eq!(compute_greedy_edit_distance(b"Xabcdef", b"Yabcdef"), 2);
        assert_eq!(compute_greedy_edit_distance(b"abcdefX", b"abcdefY"), 2);
    }

    #[test]
    fn input_is_not_reordered() {
        let a = vec![3, 2, 1, 0];
        let b = vec![3, 2];
        let (a0, b0) = (a.clone(), b.clone());
        assert_eq!(compute_greedy_edit_distance(&a, &b), 2);
        assert_eq!((a, b), (a0, b0));
    }

    #[test]
    fn sequence_too_long() {
        // Zero-sized elements, so nothing is allocated.
        let a = vec![(); Fr::MAX as usize];
        assert_eq!(
            try_compute_greedy_edit_distance(&a, &[()]),
            Err(DistanceError::SequenceTooLong {
                len_a: Fr::MAX as usize,
                len_b: 1
            })
        );
        assert_eq!(
            try_compute_greedy_edit_distance(&[()], &a),
            Err(DistanceError::SequenceTooLong {
                len_a: 1,
                len_b: Fr::MAX as usize
            })
        );
    }

    #[test]
    fn aligner() {
        assert_eq!(Myers.align(b"ACGT", b"AGT"), (1, None));
    }
}
