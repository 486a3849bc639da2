//! Instancing of outline (`gvar`) and control-value (`cvar`) variations.
//!
//! Default deltas are folded into the glyph outlines and their phantom
//! points, which regenerates the horizontal and vertical metrics. Glyphs
//! are processed in composite-depth order so a composite's bounding box is
//! computed against already-instanced base glyphs.

use crate::font::Font;
use crate::instancer::tuplevar::instantiate_tuple_variation_store;
use crate::instancer::NormalizedAxisLimits;
use crate::otvar::{iup, Delta, TupleVariation};
use crate::tables::glyf::glyf;
use crate::tables::hmtx::Metric;
use crate::tables::vmtx::VMetric;
use crate::types::round_half_even;

/// The four phantom points of a glyph: left origin, right (advance), top
/// origin, bottom. Derived from the glyph's bounds and metrics.
fn phantom_points(font: &Font, glyph_ix: usize) -> [(f64, f64); 4] {
    let glyph = &font.glyf.as_ref().unwrap().glyphs[glyph_ix];
    let metric = font.hmtx.as_ref().unwrap().metrics[glyph_ix];
    let left_side_x = glyph.xMin as f64 - metric.lsb as f64;
    let right_side_x = left_side_x + metric.advanceWidth as f64;
    let (top_side_y, bottom_side_y) = match font.vmtx.as_ref() {
        Some(vmtx) => {
            let vmetric = vmtx.metrics[glyph_ix];
            let top = glyph.yMax as f64 + vmetric.tsb as f64;
            (top, top - vmetric.advanceHeight as f64)
        }
        None => (0.0, 0.0),
    };
    [
        (left_side_x, 0.0),
        (right_side_x, 0.0),
        (0.0, top_side_y),
        (0.0, bottom_side_y),
    ]
}

/// Write an instanced coordinate stream (outline points, component
/// offsets, then the four phantom points) back into the font: outline,
/// bounds, and the metrics the phantom points encode.
fn set_glyph_coordinates(font: &mut Font, glyph_ix: usize, coords: &[(f64, f64)]) {
    let n = coords.len() - 4;
    let glyf = font.glyf.as_mut().unwrap();
    glyf.glyphs[glyph_ix].set_coordinates(&coords[..n]);
    glyf.recalc_bounds(glyph_ix);
    let glyph = &glyf.glyphs[glyph_ix];
    let [left, right, top, bottom] = [coords[n], coords[n + 1], coords[n + 2], coords[n + 3]];
    font.hmtx.as_mut().unwrap().metrics[glyph_ix] = Metric {
        advanceWidth: round_half_even(right.0 - left.0).max(0) as u16,
        lsb: round_half_even(glyph.xMin as f64 - left.0) as i16,
    };
    let y_max = glyph.yMax as f64;
    if let Some(vmtx) = font.vmtx.as_mut() {
        vmtx.metrics[glyph_ix] = VMetric {
            advanceHeight: round_half_even(top.1 - bottom.1).max(0) as u16,
            tsb: round_half_even(top.1 - y_max) as i16,
        };
    }
}

/// Resolve any inferred (absent) deltas so the variation can be scaled
/// and merged. Interpolation runs per contour; phantom points and
/// component offsets are single-point contours and default to zero.
fn densify_deltas(var: &mut TupleVariation, coords: &[(f64, f64)], ends: &[usize]) {
    if var.deltas.iter().all(|d| d.is_some()) {
        return;
    }
    let mut dense = vec![];
    let mut start = 0;
    for &end in ends {
        iup::iup_contour(&mut dense, &var.deltas[start..end + 1], &coords[start..end + 1]);
        start = end + 1;
    }
    var.deltas = dense
        .into_iter()
        .map(|d| Some(Delta::Delta2D(d)))
        .collect();
}

fn instantiate_gvar_glyph(
    font: &mut Font,
    glyph_ix: usize,
    axis_limits: &NormalizedAxisLimits,
    optimize: bool,
) {
    let (mut coords, mut ends) = font.glyf.as_ref().unwrap().glyphs[glyph_ix].coordinates_and_ends();
    for phantom in phantom_points(font, glyph_ix) {
        coords.push(phantom);
        ends.push(coords.len() - 1);
    }

    let variations = &mut font.gvar.as_mut().unwrap().variations[glyph_ix];
    for var in variations.iter_mut() {
        densify_deltas(var, &coords, &ends);
    }
    let default_deltas = instantiate_tuple_variation_store(variations, axis_limits);
    for (coord, delta) in coords.iter_mut().zip(default_deltas.iter()) {
        if let Some(delta) = delta {
            let (dx, dy) = delta.get_2d();
            coord.0 += dx;
            coord.1 += dy;
        }
    }

    set_glyph_coordinates(font, glyph_ix, &coords);

    if optimize {
        let variations = &mut font.gvar.as_mut().unwrap().variations[glyph_ix];
        for var in variations.iter_mut() {
            var.deltas = iup::optimize_deltas(std::mem::take(&mut var.deltas), &coords, &ends, 0.5);
        }
    }
}

/// Instantiate the `gvar` table, folding default outline deltas into
/// `glyf` and regenerating `hmtx`/`vmtx`. Composite glyphs with no
/// variations of their own still get their metrics and bounds refreshed,
/// because their referenced glyphs may have moved.
pub(crate) fn instantiate_gvar(font: &mut Font, axis_limits: &NormalizedAxisLimits, optimize: bool) {
    log::info!("Instantiating glyf/gvar tables");
    let glyf: &glyf = font.glyf.as_ref().unwrap();
    let mut order: Vec<usize> = (0..glyf.glyphs.len()).collect();
    // Base glyphs before the composites that reference them
    let depths: Vec<usize> = order.iter().map(|&ix| glyf.composite_depth(ix)).collect();
    order.sort_by_key(|&ix| (depths[ix], ix));

    for glyph_ix in order {
        instantiate_gvar_glyph(font, glyph_ix, axis_limits, optimize);
    }

    if font.gvar.as_ref().unwrap().is_empty() {
        log::info!("Dropping gvar table");
        font.gvar = None;
    }
}

/// Instantiate the `cvar` table, folding default deltas into `cvt `.
pub(crate) fn instantiate_cvar(font: &mut Font, axis_limits: &NormalizedAxisLimits) {
    log::info!("Instantiating cvt/cvar tables");
    let cvar = font.cvar.as_mut().unwrap();
    let default_deltas = instantiate_tuple_variation_store(&mut cvar.variations, axis_limits);
    if !default_deltas.is_empty() {
        let cvt = font.cvt.as_mut().unwrap();
        for (value, delta) in cvt.0.iter_mut().zip(default_deltas.iter()) {
            if let Some(delta) = delta {
                *value = round_half_even(*value as f64 + delta.get_1d()) as i16;
            }
        }
    }
    if font.cvar.as_ref().unwrap().variations.is_empty() {
        log::info!("Dropping cvar table");
        font.cvar = None;
    }
}
