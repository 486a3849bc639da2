//! The `GPOS` table: glyph positioning.
//!
//! Only the lookup types carrying instancer-relevant data (value records
//! and anchors) are decoded here; the script list and remaining lookup
//! types pass through the font I/O layer untouched.

use crate::layout::common::{FeatureRecord, FeatureVariations};
use crate::layout::gpos1::SinglePos;
use crate::layout::gpos2::PairPos;
use crate::layout::gpos4::MarkBasePos;
use crate::types::uint16;
use serde::{Deserialize, Serialize};

/// A positioning rule within a lookup.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Positioning {
    /// Single adjustment (lookup type 1)
    Single(SinglePos),
    /// Pair adjustment (lookup type 2)
    Pair(PairPos),
    /// Mark-to-base attachment (lookup type 4)
    MarkToBase(MarkBasePos),
}

/// A GPOS lookup.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Lookup {
    /// Lookup qualifiers
    pub flags: uint16,
    /// Mark filtering set, if the flags call for one
    pub mark_filtering_set: Option<uint16>,
    /// The positioning rule
    pub rule: Positioning,
}

/// The Glyph Positioning table
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct GPOS {
    /// The lookup list
    pub lookups: Vec<Lookup>,
    /// The feature list: tags with the lookups they activate
    pub features: Vec<FeatureRecord>,
    /// Feature variations, if the font has condition-gated features
    pub feature_variations: Option<FeatureVariations>,
}
