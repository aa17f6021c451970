//! # Edit distance engines
//!
//! Two independent ways to compute the edit distance between two sequences:
//! - `wagner_fischer`: the full `(|a|+1) x (|b|+1)` DP grid with arbitrary
//!   non-negative insertion, deletion and substitution costs.
//! - `myers`: the greedy furthest reaching diagonal search, in `O((n+m)p)`
//!   time, for unit indel costs.
//!
//! Both work on slices of any `T: PartialEq`. For byte sequences they are
//! also available as `pa_types::Aligner`s via `WagnerFischer` and `Myers`.
//!
//! ```
//! use ed_algos::*;
//!
//! assert_eq!(compute_edit_distance(b"abc", b"abcd", &CostModel::default()), 1);
//! assert_eq!(compute_greedy_edit_distance(b"abc", b"xyz"), 6);
//! ```

mod cost_model;
mod error;

pub mod myers;
pub mod wagner_fischer;

pub use cost_model::CostModel;
pub use error::{CostModelError, DistanceError};
pub use myers::{compute_greedy_edit_distance, try_compute_greedy_edit_distance, Myers};
pub use wagner_fischer::{compute_edit_distance, try_compute_edit_distance, WagnerFischer};
