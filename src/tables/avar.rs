//! The `avar` table: per-axis piecewise-linear warps of the normalized space.

use crate::types::f2dot14_round;
use serde::{Deserialize, Serialize};

/// A mapping between normalized coordinates for a single axis.
///
/// A valid segment map contains the entries `-1.0 => -1.0`, `0.0 => 0.0`
/// and `1.0 => 1.0`, with from-coordinates in increasing order.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SegmentMap(pub Vec<(f64, f64)>);

/// The axis variations table: one segment map per fvar axis, in axis order.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct avar {
    pub maps: Vec<SegmentMap>,
}

impl SegmentMap {
    /// Creates a new segment map from an array of tuples. These tuples
    /// must be in normalized coordinates, and must include entries for
    /// `-1.0,-1.0`, `0.0,0.0` and `1.0,1.0`.
    pub fn new(items: Vec<(f64, f64)>) -> Self {
        let map = SegmentMap(items);
        if !map.is_valid() {
            panic!("Created an invalid segment map {:?}", map);
        }
        map
    }

    /// An identity map, leaving every coordinate unchanged.
    pub fn identity() -> Self {
        SegmentMap(vec![(-1.0, -1.0), (0.0, 0.0), (1.0, 1.0)])
    }

    /// Map a (normalized, i.e. `-1.0 <= val <= 1.0`) value using this segment map.
    pub fn piecewise_linear_map(&self, val: f64) -> f64 {
        if self.0.is_empty() {
            return val;
        }
        let from: Vec<f64> = self.0.iter().map(|x| x.0).collect();
        let to: Vec<f64> = self.0.iter().map(|x| x.1).collect();
        if val <= -1.0 {
            return -1.0;
        }
        if val >= 1.0 {
            return 1.0;
        }
        if let Some(ix) = from.iter().position(|&r| (r - val).abs() < f64::EPSILON) {
            return to[ix];
        }
        match from.iter().position(|&r| r > val) {
            Some(ix) => {
                let a = from[ix - 1];
                let b = from[ix];
                let va = to[ix - 1];
                let vb = to[ix];
                va + (vb - va) * (val - a) / (b - a)
            }
            // -1/0/+1 entries are mandatory, so a bracketing pair exists
            None => val,
        }
    }

    /// Map a value and snap the result to the F2DOT14 grid, the way a
    /// rasterizer reading the binary table would see it.
    pub fn map_and_round(&self, val: f64) -> f64 {
        f2dot14_round(self.piecewise_linear_map(val))
    }

    /// Check that this segment map is valid: it contains entries for
    /// -1, 0 and 1, and the entries are in order.
    pub fn is_valid(&self) -> bool {
        let mut saw_zero = 0;
        let mut saw_minus1 = 0;
        let mut saw_plus1 = 0;
        let mut prev_to_coordinate = -2.0;
        for &(from, to) in &self.0 {
            if from == 0.0 && to == 0.0 {
                saw_zero += 1;
            }
            if (from - -1.0).abs() < f64::EPSILON && (to - -1.0).abs() < f64::EPSILON {
                saw_minus1 += 1;
            }
            if (from - 1.0).abs() < f64::EPSILON && (to - 1.0).abs() < f64::EPSILON {
                saw_plus1 += 1;
            }
            if to < prev_to_coordinate {
                return false;
            }
            prev_to_coordinate = to;
        }
        saw_zero == 1 && saw_plus1 == 1 && saw_minus1 == 1
    }
}
