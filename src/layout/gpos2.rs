//! Pair adjustment positioning.

use crate::layout::valuerecord::ValueRecord;
use crate::types::GlyphID;
use serde::{Deserialize, Serialize};

/// One positioned pair of glyphs.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PairValueRecord {
    /// First glyph of the pair
    pub first: GlyphID,
    /// Second glyph of the pair
    pub second: GlyphID,
    /// Adjustments to the first glyph
    pub value_record_1: ValueRecord,
    /// Adjustments to the second glyph
    pub value_record_2: ValueRecord,
}

/// A pair positioning subtable.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct PairPos {
    /// The positioned pairs.
    pub pairs: Vec<PairValueRecord>,
}
