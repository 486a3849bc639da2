//! Tuple variations: a region of the designspace plus the deltas to apply there.

use crate::otvar::Support;
use crate::types::{f2dot14_bits, round_half_even, Tag};
use serde::{Deserialize, Serialize};

/// Represents either a two-dimensional (`gvar`) or one-dimensional
/// (`cvar`, item store) delta value
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum Delta {
    /// A one-dimensional delta (used in the `cvar` table and in item stores)
    Delta1D(f64),
    /// A two-dimensional delta (used in the `gvar` table)
    Delta2D((f64, f64)),
}

impl Delta {
    /// Assuming that this is a two-dimensional delta, returns the delta as an
    /// X,Y coordinate tuple.
    pub fn get_2d(&self) -> (f64, f64) {
        if let Delta::Delta2D(p) = self {
            *p
        } else {
            panic!("Tried to turn a scalar delta into a coordinate delta");
        }
    }

    /// Assuming that this is a one-dimensional delta, returns the scalar value.
    pub fn get_1d(&self) -> f64 {
        if let Delta::Delta1D(d) = self {
            *d
        } else {
            panic!("Tried to turn a coordinate delta into a scalar delta");
        }
    }

    fn scale(&mut self, scalar: f64) {
        match self {
            Delta::Delta1D(d) => *d *= scalar,
            Delta::Delta2D((x, y)) => {
                *x *= scalar;
                *y *= scalar;
            }
        }
    }

    fn round(&mut self) {
        match self {
            Delta::Delta1D(d) => *d = round_half_even(*d) as f64,
            Delta::Delta2D((x, y)) => {
                *x = round_half_even(*x) as f64;
                *y = round_half_even(*y) as f64;
            }
        }
    }

    fn is_zero(&self) -> bool {
        match self {
            Delta::Delta1D(d) => *d == 0.0,
            Delta::Delta2D((x, y)) => *x == 0.0 && *y == 0.0,
        }
    }
}

/// How a set of values varies at one region of the designspace.
///
/// The deltas are indexed like the items they apply to (outline points plus
/// phantom points for `gvar`, control values for `cvar`, rows of a variation
/// data block for item stores); a `None` entry means the point carries no
/// explicit delta and is inferred (outlines) or zero (everything else).
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct TupleVariation {
    /// The region this variation is active in, as a per-axis `(start, peak,
    /// end)` tent. Absent axes do not constrain the region.
    pub axes: Support,
    /// One delta per item, `None` for items without an explicit delta.
    pub deltas: Vec<Option<Delta>>,
}

impl TupleVariation {
    /// Create a new tuple variation.
    pub fn new(axes: Support, deltas: Vec<Option<Delta>>) -> Self {
        TupleVariation { axes, deltas }
    }

    /// Scale all deltas by a scalar.
    pub fn scale_deltas(&mut self, scalar: f64) {
        for delta in self.deltas.iter_mut().flatten() {
            delta.scale(scalar);
        }
    }

    /// Round all deltas to integers (ties to even).
    pub fn round_deltas(&mut self) {
        for delta in self.deltas.iter_mut().flatten() {
            delta.round();
        }
    }

    /// True if any delta is present and non-zero.
    pub fn has_effect(&self) -> bool {
        self.deltas.iter().flatten().any(|d| !d.is_zero())
    }

    /// Add another variation's deltas to this one, component-wise. An absent
    /// delta on one side adopts the other side's value.
    pub fn add_deltas(&mut self, other: &TupleVariation) {
        if self.deltas.len() != other.deltas.len() {
            panic!("Tried to add deltas with different lengths");
        }
        for (ours, theirs) in self.deltas.iter_mut().zip(other.deltas.iter()) {
            match (ours.as_mut(), theirs) {
                (_, None) => {}
                (None, Some(d)) => *ours = Some(*d),
                (Some(a), Some(b)) => match (a, b) {
                    (Delta::Delta1D(x), Delta::Delta1D(y)) => *x += *y,
                    (Delta::Delta2D((x1, y1)), Delta::Delta2D((x2, y2))) => {
                        *x1 += *x2;
                        *y1 += *y2;
                    }
                    _ => panic!("Tried to add deltas of different dimensions"),
                },
            }
        }
    }

    /// A hashable identity for this variation's region, on the F2DOT14 grid.
    pub fn region_key(&self) -> Vec<(Tag, i32, i32, i32)> {
        support_key(&self.axes)
    }
}

/// Quantize a region to the F2DOT14 grid so two regions can be compared the
/// way they would compare after a compile/decompile round trip.
pub fn support_key(support: &Support) -> Vec<(Tag, i32, i32, i32)> {
    support
        .iter()
        .map(|(&tag, &(start, peak, end))| {
            (
                tag,
                f2dot14_bits(start),
                f2dot14_bits(peak),
                f2dot14_bits(end),
            )
        })
        .collect()
}
