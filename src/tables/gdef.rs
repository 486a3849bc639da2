//! The `GDEF` table: glyph classes, attachment points, ligature carets, and
//! the item variation store backing GPOS/GDEF device deltas.

use crate::layout::device::DeviceOrVariationIndex;
use crate::otvar::ItemVariationStore;
use crate::types::{int16, uint16, GlyphID};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A glyph class definition in the GDEF table
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum GlyphClass {
    /// Base glyph (single character, spacing glyph)
    BaseGlyph = 1,
    /// Ligature glyph (multiple character, spacing glyph)
    LigatureGlyph,
    /// Mark glyph (non-spacing combining glyph)
    MarkGlyph,
    /// Component glyph (part of single character, spacing glyph)
    ComponentGlyph,
}

/// A low-level caret value in a GDEF table
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum CaretValue {
    /// A format 1 caret value
    Format1 {
        /// X or Y value, in design units
        coordinate: int16,
    },
    /// A format 2 caret value
    Format2 {
        /// Contour point index on glyph
        pointIndex: uint16,
    },
    /// A format 3 caret value
    Format3 {
        /// X or Y value, in design units
        coordinate: int16,
        /// Device table (non-variable font) / Variation Index table
        /// (variable font) for the X or Y value
        device: DeviceOrVariationIndex,
    },
}

/// A GDEF (Glyph Definition) table
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct GDEF {
    /// Glyph class definitions
    pub glyph_class: BTreeMap<GlyphID, GlyphClass>,
    /// Attachment point list
    pub attachment_point_list: BTreeMap<GlyphID, Vec<uint16>>,
    /// Ligature caret list
    pub ligature_caret_list: BTreeMap<GlyphID, Vec<CaretValue>>,
    /// Mark attachment class list
    pub mark_attachment_class: BTreeMap<GlyphID, uint16>,
    /// Mark glyph sets
    pub mark_glyph_sets: Option<Vec<BTreeSet<GlyphID>>>,
    /// Item variation store
    pub item_variation_store: Option<ItemVariationStore>,
}

impl GDEF {
    /// The minor version the binary table will carry: 3 with a variation
    /// store, 2 with mark glyph sets, 0 otherwise.
    pub fn minor_version(&self) -> uint16 {
        if self.item_variation_store.is_some() {
            3
        } else if self.mark_glyph_sets.is_some() {
            2
        } else {
            0
        }
    }

    /// True if the table carries no data at all and can be dropped.
    pub fn is_empty(&self) -> bool {
        self.glyph_class.is_empty()
            && self.attachment_point_list.is_empty()
            && self.ligature_caret_list.is_empty()
            && self.mark_attachment_class.is_empty()
            && self.mark_glyph_sets.is_none()
            && self.item_variation_store.is_none()
    }
}
