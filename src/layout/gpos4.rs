//! Mark-to-base attachment positioning.

use crate::layout::anchor::Anchor;
use crate::types::{uint16, GlyphID};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A mark glyph: its mark class and attachment anchor.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MarkRecord {
    /// Class of this mark, an index into each base's anchor list
    pub mark_class: uint16,
    /// Where the mark attaches
    pub mark_anchor: Anchor,
}

/// A mark-to-base positioning subtable.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct MarkBasePos {
    /// Mark glyphs and their anchors
    pub marks: BTreeMap<GlyphID, MarkRecord>,
    /// Base glyphs; each base carries one optional anchor per mark class
    pub bases: BTreeMap<GlyphID, Vec<Option<Anchor>>>,
}
