//! Instancing of tuple variations, the algorithm every other pass leans on.
//!
//! Pinned axes are projected out: each variation is scaled by the region's
//! support scalar at the pinned location and the axis disappears from the
//! region. Limited axes are clipped: the region's tent is intersected with
//! the surviving range and rewritten so that the support over the new,
//! renormalised axis matches the original. Variations whose region becomes
//! empty are the "default deltas", returned to the caller to be folded
//! into static values.

use crate::instancer::NormalizedAxisLimits;
use crate::otvar::{support_scalar, Delta, Location, Support, TupleVariation};
use crate::types::Tag;
use std::collections::BTreeMap;

/// The widest tent end representable in F2DOT14.
const MAX_F2DOT14: f64 = 2.0;

fn pin_tuple_variation_axes(
    variations: Vec<TupleVariation>,
    location: &Location,
) -> Vec<TupleVariation> {
    let mut new_variations = vec![];
    for mut var in variations {
        // Project out the pinned axes: their contribution at the pinned
        // location becomes a plain scale factor.
        let mut support = Support::new();
        for tag in location.keys() {
            if let Some(tent) = var.axes.remove(tag) {
                support.insert(*tag, tent);
            }
        }
        let scalar = support_scalar(location, &support);
        if scalar == 0.0 {
            continue;
        }
        if scalar != 1.0 {
            var.scale_deltas(scalar);
        }
        new_variations.push(var);
    }
    new_variations
}

/// Clip one variation's tent on one axis to the range `[minimum, maximum]`
/// (normalized, containing 0), rewriting start/peak/end into the axis's
/// new normalized space. May produce zero, one or two variations: a tent
/// whose renormalised end would not fit in F2DOT14 is split in two.
fn limit_tuple_variation_axis_range(
    mut var: TupleVariation,
    axis: Tag,
    minimum: f64,
    maximum: f64,
) -> Vec<TupleVariation> {
    let (lower, peak, upper) = match var.axes.get(&axis) {
        None => return vec![var],
        Some(&tent) => tent,
    };
    // Tents that never participate (peak at default, out of order, or
    // spanning the default) impose no constraint within the new domain.
    if peak == 0.0 || lower > peak || peak > upper || (lower < 0.0 && upper > 0.0) {
        var.axes.remove(&axis);
        return vec![var];
    }

    // Mirror negative-side tents onto the positive side.
    let negative = peak < 0.0;
    let limit = if negative { -minimum } else { maximum };
    let (mut lower, mut peak, mut upper) = if negative {
        (-upper, -peak, -lower)
    } else {
        (lower, peak, upper)
    };

    // The surviving side of the axis is gone entirely.
    if limit <= 0.0 {
        return vec![];
    }
    // The axis keeps its full extent on this side.
    if limit >= 1.0 {
        return vec![var];
    }
    // The support starts at or beyond the new boundary.
    if lower >= limit {
        return vec![];
    }

    let restore = |tent: (f64, f64, f64)| -> (f64, f64, f64) {
        if negative {
            (-tent.2, -tent.1, -tent.0)
        } else {
            tent
        }
    };

    if peak >= limit {
        // The peak falls outside the surviving range but there is support
        // at the boundary: the boundary becomes the new peak and the
        // deltas shrink by the residual scalar there.
        let scalar = (limit - lower) / (peak - lower);
        var.scale_deltas(scalar);
        var.axes
            .insert(axis, restore((lower / limit, 1.0, 1.0)));
        return vec![var];
    }

    lower /= limit;
    peak /= limit;
    upper /= limit;
    if upper <= MAX_F2DOT14 {
        var.axes.insert(axis, restore((lower, peak, upper)));
        return vec![var];
    }

    // The renormalised end does not fit in F2DOT14. A triangle with one
    // side cut off is not a triangle, so express the falling flank as two
    // tents: one dropping to zero at the end of the axis and one rising
    // there, scaled to the residual support.
    let mut rising = var.clone();
    rising.axes.insert(axis, restore((lower, peak, 1.0)));
    let residual = (1.0 - upper) / (peak - upper);
    var.scale_deltas(residual);
    var.axes.insert(axis, restore((peak, 1.0, 1.0)));
    vec![rising, var]
}

fn limit_tuple_variation_axis_ranges(
    mut variations: Vec<TupleVariation>,
    axis_ranges: &BTreeMap<Tag, (f64, f64)>,
) -> Vec<TupleVariation> {
    for (&axis, &(minimum, maximum)) in axis_ranges {
        variations = variations
            .into_iter()
            .flat_map(|var| limit_tuple_variation_axis_range(var, axis, minimum, maximum))
            .collect();
    }
    variations
}

/// Instantiate a list of tuple variations in place.
///
/// Returns the accumulated deltas of the variations whose region became
/// empty (unconditional at every surviving location), unrounded; the
/// caller folds them into its static values. Surviving variations are
/// merged by region, their deltas rounded, and all-zero variations
/// removed.
pub fn instantiate_tuple_variation_store(
    variations: &mut Vec<TupleVariation>,
    axis_limits: &NormalizedAxisLimits,
) -> Vec<Option<Delta>> {
    let (pinned, axis_ranges) = axis_limits.split_up();
    let mut new_variations = std::mem::take(variations);
    if !pinned.is_empty() {
        new_variations = pin_tuple_variation_axes(new_variations, &pinned);
    }
    if !axis_ranges.is_empty() {
        new_variations = limit_tuple_variation_axis_ranges(new_variations, &axis_ranges);
    }

    // Merge variations that now share a region, in first-appearance order.
    let mut merged: Vec<TupleVariation> = vec![];
    for var in new_variations {
        let key = var.region_key();
        match merged.iter_mut().find(|m| m.region_key() == key) {
            Some(existing) => existing.add_deltas(&var),
            None => merged.push(var),
        }
    }

    let mut default_deltas = vec![];
    if let Some(pos) = merged.iter().position(|var| var.axes.is_empty()) {
        default_deltas = merged.remove(pos).deltas;
    }
    for var in merged.iter_mut() {
        var.round_deltas();
    }
    merged.retain(|var| var.has_effect());
    *variations = merged;
    default_deltas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::btreemap;
    use crate::instancer::NormalizedAxisLimit;
    use crate::tag;

    fn d1(values: &[f64]) -> Vec<Option<Delta>> {
        values.iter().map(|&v| Some(Delta::Delta1D(v))).collect()
    }

    fn pins(location: &[(Tag, f64)]) -> NormalizedAxisLimits {
        NormalizedAxisLimits(
            location
                .iter()
                .map(|&(tag, v)| (tag, NormalizedAxisLimit::Pin(v)))
                .collect(),
        )
    }

    fn ranges(location: &[(Tag, f64, f64)]) -> NormalizedAxisLimits {
        NormalizedAxisLimits(
            location
                .iter()
                .map(|&(tag, lo, hi)| (tag, NormalizedAxisLimit::Range(lo, hi)))
                .collect(),
        )
    }

    #[test]
    fn test_pin_projects_and_merges() {
        let mut variations = vec![
            TupleVariation::new(btreemap!(tag!("wght") => (-1.0, -1.0, 0.0)), d1(&[10.0, 70.0])),
            TupleVariation::new(btreemap!(tag!("wght") => (0.0, 1.0, 1.0)), d1(&[30.0, 90.0])),
            TupleVariation::new(
                btreemap!(tag!("wght") => (-1.0, -1.0, 0.0), tag!("wdth") => (-1.0, -1.0, 0.0)),
                d1(&[-40.0, -100.0]),
            ),
            TupleVariation::new(
                btreemap!(tag!("wght") => (0.0, 1.0, 1.0), tag!("wdth") => (-1.0, -1.0, 0.0)),
                d1(&[-60.0, -120.0]),
            ),
        ];
        let defaults =
            instantiate_tuple_variation_store(&mut variations, &pins(&[(tag!("wght"), 0.5)]));
        assert_eq!(defaults, d1(&[15.0, 45.0]));
        assert_eq!(
            variations,
            vec![TupleVariation::new(
                btreemap!(tag!("wdth") => (-1.0, -1.0, 0.0)),
                d1(&[-30.0, -60.0])
            )]
        );
    }

    #[test]
    fn test_pin_merges_rounds_half_even() {
        let mut variations = vec![
            TupleVariation::new(btreemap!(tag!("wdth") => (-1.0, -1.0, 0.0)), d1(&[5.0, 45.0])),
            TupleVariation::new(
                btreemap!(tag!("wght") => (-1.0, -1.0, 0.0), tag!("wdth") => (-1.0, -1.0, 0.0)),
                d1(&[-15.0, -55.0]),
            ),
            TupleVariation::new(
                btreemap!(tag!("wght") => (0.0, 1.0, 1.0), tag!("wdth") => (-1.0, -1.0, 0.0)),
                d1(&[-35.0, -75.0]),
            ),
        ];
        let defaults =
            instantiate_tuple_variation_store(&mut variations, &pins(&[(tag!("wght"), 0.5)]));
        assert!(defaults.is_empty());
        // 5 + 0.5*-35 = -12.5 and 45 + 0.5*-75 = 7.5; ties go to even
        assert_eq!(
            variations,
            vec![TupleVariation::new(
                btreemap!(tag!("wdth") => (-1.0, -1.0, 0.0)),
                d1(&[-12.0, 8.0])
            )]
        );
    }

    #[test]
    fn test_pin_at_default_drops_axis() {
        let mut variations = vec![TupleVariation::new(
            btreemap!(tag!("wdth") => (-1.0, -1.0, 0.0)),
            d1(&[100.0]),
        )];
        let defaults =
            instantiate_tuple_variation_store(&mut variations, &pins(&[(tag!("wdth"), 0.0)]));
        assert!(defaults.is_empty());
        assert!(variations.is_empty());
    }

    #[test]
    fn test_limit_inside_tent() {
        // Tent (0, 0.5, 1) limited to [0, 0.8]: everything survives,
        // renormalised by 0.8
        let var = TupleVariation::new(btreemap!(tag!("wght") => (0.0, 0.5, 1.0)), d1(&[100.0]));
        let out = limit_tuple_variation_axis_range(var, tag!("wght"), 0.0, 0.8);
        assert_eq!(out.len(), 1);
        let (lower, peak, upper) = out[0].axes[&tag!("wght")];
        assert!((lower - 0.0).abs() < 1e-12);
        assert!((peak - 0.625).abs() < 1e-12);
        assert!((upper - 1.25).abs() < 1e-12);
        assert_eq!(out[0].deltas, d1(&[100.0]));
    }

    #[test]
    fn test_limit_peak_outside() {
        // Tent (0, 0.8, 1) limited to [0, 0.4]: support at the boundary is
        // 0.5, which becomes the new peak scalar
        let var = TupleVariation::new(btreemap!(tag!("wght") => (0.0, 0.8, 1.0)), d1(&[100.0]));
        let out = limit_tuple_variation_axis_range(var, tag!("wght"), 0.0, 0.4);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].axes[&tag!("wght")], (0.0, 1.0, 1.0));
        assert_eq!(out[0].deltas, d1(&[50.0]));
    }

    #[test]
    fn test_limit_outside_support_drops() {
        let var = TupleVariation::new(btreemap!(tag!("wght") => (0.5, 0.8, 1.0)), d1(&[100.0]));
        let out = limit_tuple_variation_axis_range(var, tag!("wght"), 0.0, 0.4);
        assert!(out.is_empty());

        // Negative-side tent with the negative side cut away entirely
        let var = TupleVariation::new(btreemap!(tag!("wght") => (-1.0, -1.0, 0.0)), d1(&[100.0]));
        let out = limit_tuple_variation_axis_range(var, tag!("wght"), 0.0, 1.0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_limit_splits_wide_tent() {
        // Tent (0, 0.2, 1) limited to [0, 0.3]: the renormalised end would
        // be 1/0.3 > 2, so the tent splits in two
        let var = TupleVariation::new(btreemap!(tag!("wght") => (0.0, 0.2, 1.0)), d1(&[120.0]));
        let out = limit_tuple_variation_axis_range(var, tag!("wght"), 0.0, 0.3);
        assert_eq!(out.len(), 2);
        let (l0, p0, u0) = out[0].axes[&tag!("wght")];
        assert!((l0 - 0.0).abs() < 1e-12 && (p0 - 2.0 / 3.0).abs() < 1e-12 && (u0 - 1.0).abs() < 1e-12);
        assert_eq!(out[0].deltas, d1(&[120.0]));
        let (l1, p1, u1) = out[1].axes[&tag!("wght")];
        assert!((l1 - 2.0 / 3.0).abs() < 1e-12 && (p1 - 1.0).abs() < 1e-12 && (u1 - 1.0).abs() < 1e-12);
        // Support of the original tent at 0.3 is (0.3-1)/(0.2-1) = 0.875;
        // renormalised, the residual at the new end is (1-10/3)/(2/3-10/3)
        let residual = (1.0 - (1.0 / 0.3)) / ((0.2 / 0.3) - (1.0 / 0.3));
        assert!((out[1].deltas[0].unwrap().get_1d() - 120.0 * residual).abs() < 1e-9);
    }

    #[test]
    fn test_limit_negative_side() {
        // Mirror of the peak-outside case on the negative side
        let var = TupleVariation::new(btreemap!(tag!("wght") => (-1.0, -1.0, 0.0)), d1(&[100.0]));
        let out = limit_tuple_variation_axis_range(var, tag!("wght"), -0.5, 0.0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].axes[&tag!("wght")], (-1.0, -1.0, 0.0));
        assert_eq!(out[0].deltas, d1(&[50.0]));
    }

    #[test]
    fn test_limit_keeps_unrelated_axes() {
        let mut variations = vec![TupleVariation::new(
            btreemap!(tag!("wght") => (0.0, 1.0, 1.0)),
            d1(&[100.0]),
        )];
        let defaults = instantiate_tuple_variation_store(
            &mut variations,
            &ranges(&[(tag!("wdth"), -1.0, 1.0)]),
        );
        assert!(defaults.is_empty());
        assert_eq!(variations.len(), 1);
        assert_eq!(
            variations[0].axes,
            btreemap!(tag!("wght") => (0.0, 1.0, 1.0))
        );
    }
}
