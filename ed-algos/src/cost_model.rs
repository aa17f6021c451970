//! The linear `CostModel` used by the Wagner-Fischer engine.
use pa_types::Cost;
use serde::{Deserialize, Serialize};

use crate::{CostModelError, DistanceError};

/// Linear insertion, deletion and substitution costs.
///
/// Matches are always free, regardless of the substitution cost.
/// All costs are non-negative; this is checked on construction, including
/// when deserializing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CostTriple")]
pub struct CostModel {
    /// Cost of inserting a character of `b`.
    ins: Cost,
    /// Cost of deleting a character of `a`.
    del: Cost,
    /// Cost of substituting a character of `a` by a different character of `b`.
    sub: Cost,
}

/// Unchecked form of `CostModel`, only used for deserializing.
#[derive(Deserialize)]
struct CostTriple {
    ins: Cost,
    del: Cost,
    sub: Cost,
}

impl TryFrom<CostTriple> for CostModel {
    type Error = CostModelError;

    fn try_from(CostTriple { ins, del, sub }: CostTriple) -> Result<Self, Self::Error> {
        CostModel::new(ins, del, sub)
    }
}

/// ins=1, del=1, sub=2: a substitution costs as much as an insertion plus a deletion.
impl Default for CostModel {
    fn default() -> Self {
        Self::indel()
    }
}

impl CostModel {
    pub fn new(ins: Cost, del: Cost, sub: Cost) -> Result<Self, CostModelError> {
        for (op, cost) in [("insertion", ins), ("deletion", del), ("substitution", sub)] {
            if cost < 0 {
                return Err(CostModelError::Negative { op, cost });
            }
        }
        Ok(Self { ins, del, sub })
    }

    /// Levenshtein distance: all operations cost 1.
    pub fn unit() -> Self {
        Self {
            ins: 1,
            del: 1,
            sub: 1,
        }
    }

    /// Insertions and deletions cost 1, and substitutions 2.
    /// This is the cost model of the `myers` engine.
    pub fn indel() -> Self {
        Self {
            ins: 1,
            del: 1,
            sub: 2,
        }
    }

    pub fn ins(&self) -> Cost {
        self.ins
    }
    pub fn del(&self) -> Cost {
        self.del
    }
    pub fn sub(&self) -> Cost {
        self.sub
    }

    /// The cost of deleting all of `a` and inserting all of `b`.
    /// No alignment can cost more than this.
    pub fn max_distance(&self, len_a: usize, len_b: usize) -> Result<Cost, DistanceError> {
        let scale = |len: usize, cost: Cost| -> Option<Cost> {
            if cost == 0 {
                return Some(0);
            }
            Cost::try_from(len).ok()?.checked_mul(cost)
        };
        scale(len_a, self.del)
            .zip(scale(len_b, self.ins))
            .and_then(|(d, i)| d.checked_add(i))
            .ok_or(DistanceError::CostOverflow { len_a, len_b })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_indel() {
        let cm = CostModel::default();
        assert_eq!((cm.ins(), cm.del(), cm.sub()), (1, 1, 2));
    }

    #[test]
    fn negative_costs_are_rejected() {
        assert_eq!(
            CostModel::new(-1, 1, 1),
            Err(CostModelError::Negative {
                op: "insertion",
                cost: -1
            })
        );
        assert_eq!(
            CostModel::new(1, 1, -3),
            Err(CostModelError::Negative {
                op: "substitution",
                cost: -3
            })
        );
        assert!(CostModel::new(0, 0, 0).is_ok());
    }

    #[test]
    fn deserialize_validates() {
        let cm: CostModel = serde_json::from_str(r#"{"ins":2,"del":3,"sub":4}"#).unwrap();
        assert_eq!(cm, CostModel::new(2, 3, 4).unwrap());
        assert!(serde_json::from_str::<CostModel>(r#"{"ins":1,"del":-1,"sub":1}"#).is_err());
    }

    #[test]
    fn max_distance() {
        let cm = CostModel::new(2, 3, 7).unwrap();
        assert_eq!(cm.max_distance(4, 5), Ok(3 * 4 + 2 * 5));
        assert_eq!(cm.max_distance(0, 0), Ok(0));
        assert_eq!(
            cm.max_distance(usize::MAX, 1),
            Err(DistanceError::CostOverflow {
                len_a: usize::MAX,
                len_b: 1
            })
        );
        // Free deletions never overflow, whatever the length.
        let free_del = CostModel::new(1, 0, 1).unwrap();
        assert_eq!(free_del.max_distance(usize::MAX, 3), Ok(3));
    }
}
