//! Designspace locations and region supports.

use crate::types::Tag;
use std::collections::BTreeMap;

/// A location in the internal -1 <= 0 => 1 representation
pub type Location = BTreeMap<Tag, f64>;

/// A region of the designspace, consisting of a set of per-axis triangular tents
pub type Support = BTreeMap<Tag, (f64, f64, f64)>;

/// Returns the contribution value of a region at a given location.
///
/// Axes absent from the location are read as 0. A tent whose peak is at 0,
/// whose triple is out of order, or which spans both sides of the default
/// does not participate and contributes 1.
pub fn support_scalar(loc: &Location, support: &Support) -> f64 {
    let mut scalar = 1.0;
    for (&axis, &(lower, peak, upper)) in support.iter() {
        if peak == 0.0 {
            continue;
        }
        if lower > peak || peak > upper {
            continue;
        }
        if lower < 0.0 && upper > 0.0 {
            continue;
        }
        let v: f64 = *loc.get(&axis).unwrap_or(&0.0);
        if (v - peak).abs() < f64::EPSILON {
            continue;
        }
        if v <= lower || upper <= v {
            scalar = 0.0;
            break;
        }
        if v < peak {
            scalar *= (v - lower) / (peak - lower)
        } else {
            scalar *= (v - upper) / (peak - upper)
        }
    }
    scalar
}

/// Normalize a user-space value against a `(minimum, default, maximum)`
/// triple, clamping to the axis domain. The default maps to 0, the minimum
/// to -1 and the maximum to +1.
pub fn normalize_value(value: f64, triple: (f64, f64, f64)) -> f64 {
    let (minimum, default, maximum) = triple;
    let value = value.clamp(minimum, maximum);
    if value < default {
        -(default - value) / (default - minimum)
    } else if value > default {
        (value - default) / (maximum - default)
    } else {
        0.0
    }
}
