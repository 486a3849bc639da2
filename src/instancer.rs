//! Partially instantiate a variable font.
//!
//! The passes in the submodules each rewrite one family of variation data;
//! [`instantiate_variable_font`] sequences them. Leaf data first: outline
//! and control-value deltas, then the item-variation-backed tables, then
//! feature variations, and the axis metadata (`avar`, `STAT`, `fvar`) last,
//! because the earlier passes need to read the original axis domains.

/// Feature-variation condition pruning
pub mod featurevars;
/// Outline (`gvar`) and control-value (`cvar`) instancing
pub mod gvar;
/// Item variation store instancing, and the tables built on it
pub mod itemvar;
/// User-space and normalized axis limits
pub mod limits;
/// Axis metadata: `avar`, `fvar`, `STAT`, name pruning
pub mod metadata;
/// Anchor, value-record and caret rewriting in GDEF/GPOS
pub mod otl;
/// The tuple-variation instancing algorithm shared by all of the above
pub mod tuplevar;

use crate::error::InstancerError;
use crate::font::Font;
use crate::tables::glyf::ComponentFlags;
pub use limits::{
    normalize_axis_limits, populate_axis_defaults, AxisRange, NormalizedAxisLimit,
    NormalizedAxisLimits, UserAxisLimit, UserAxisLimits,
};

/// Knobs for [`instantiate_variable_font`].
#[derive(Debug, Clone, Copy)]
pub struct InstancerOptions {
    /// Re-express surviving outline deltas with the smallest explicit
    /// delta set after instancing. Semantically a no-op.
    pub optimize: bool,
    /// When the font becomes fully static, set the overlap flag on every
    /// glyph's first contour or component, as the macOS rasterizer expects
    /// of instances without a variations table.
    pub overlap_flag: bool,
}

impl Default for InstancerOptions {
    fn default() -> Self {
        InstancerOptions {
            optimize: true,
            overlap_flag: true,
        }
    }
}

fn sanity_check(font: &Font) -> Result<(), InstancerError> {
    if font.fvar.is_none() {
        return Err(InstancerError::StructuralError(
            "Missing required table fvar".to_string(),
        ));
    }
    if font.gvar.is_some() && font.glyf.is_none() {
        return Err(InstancerError::StructuralError(
            "Can't have gvar without glyf".to_string(),
        ));
    }
    if font.glyf.is_some() && font.hmtx.is_none() {
        return Err(InstancerError::StructuralError(
            "Can't have glyf without hmtx".to_string(),
        ));
    }
    if font.cvar.is_some() && font.cvt.is_none() {
        return Err(InstancerError::StructuralError(
            "Can't have cvar without cvt ".to_string(),
        ));
    }
    Ok(())
}

fn set_overlap_flags(font: &mut Font) {
    if let Some(glyf) = font.glyf.as_mut() {
        for glyph in glyf.glyphs.iter_mut() {
            if let Some(first) = glyph.components.first_mut() {
                first.flags |= ComponentFlags::OVERLAP_COMPOUND;
            } else if !glyph.contours.is_empty() {
                glyph.overlap = true;
            }
        }
    }
}

/// Reduce the font's design space according to `limits`.
///
/// Axes named in the limits are pinned to a single value or restricted to
/// a sub-range; axes left out stay fully variable. The font is mutated in
/// place. Nothing is mutated before validation completes: all errors
/// surface from the sanity check and limit normalization up front.
///
/// Restricting is associative: limiting and then pinning gives the same
/// font as a single call with the combined limits.
pub fn instantiate_variable_font(
    font: &mut Font,
    limits: UserAxisLimits,
    options: &InstancerOptions,
) -> Result<(), InstancerError> {
    sanity_check(font)?;
    let limits = populate_axis_defaults(font, limits)?;
    log::debug!("Restricting axes: {:?}", limits);
    let axis_limits = normalize_axis_limits(font, &limits, true)?;
    log::debug!("Normalized limits: {:?}", axis_limits);
    let axis_order = font.fvar.as_ref().unwrap().axis_tags();

    let name_ids_before = metadata::get_variation_name_ids(font);

    if font.gvar.is_some() {
        gvar::instantiate_gvar(font, &axis_limits, options.optimize);
    }
    if font.cvar.is_some() {
        gvar::instantiate_cvar(font, &axis_limits);
    }
    if font.mvar.is_some() {
        itemvar::instantiate_mvar(font, &axis_order, &axis_limits);
    }
    if font.hvar.is_some() {
        itemvar::instantiate_hvar(font, &axis_order, &axis_limits);
    }
    if font.vvar.is_some() {
        itemvar::instantiate_vvar(font, &axis_order, &axis_limits);
    }
    otl::instantiate_otl(font, &axis_order, &axis_limits);
    featurevars::instantiate_feature_variations(font, &axis_limits);
    if font.avar.is_some() {
        metadata::instantiate_avar(font, &limits)?;
    }
    if font.stat.is_some() {
        metadata::instantiate_stat(font, &limits);
    }
    metadata::instantiate_fvar(font, &limits);
    metadata::prune_unused_names(font, name_ids_before);

    if !font.is_variable() && options.overlap_flag {
        set_overlap_flags(font);
    }
    Ok(())
}
