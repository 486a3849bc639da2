//! The `HVAR` and `VVAR` tables: variations of per-glyph metrics.

use crate::otvar::ItemVariationStore;
use crate::types::uint32;
use serde::{Deserialize, Serialize};

/// Represents a font's HVAR (Horizontal Metrics Variations) table.
///
/// Each mapping is a decoded delta-set index map: one 32-bit variation
/// index per glyph, in glyph order. A missing advance map means glyph IDs
/// index the store's first variation data subtable directly.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct HVAR {
    /// The variation store holding the deltas
    pub itemVariationStore: ItemVariationStore,
    /// Variation indices for advance widths
    pub advanceWidthMapping: Option<Vec<uint32>>,
    /// Variation indices for left side bearings
    pub lsbMapping: Option<Vec<uint32>>,
    /// Variation indices for right side bearings
    pub rsbMapping: Option<Vec<uint32>>,
}

/// Represents a font's VVAR (Vertical Metrics Variations) table
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct VVAR {
    /// The variation store holding the deltas
    pub itemVariationStore: ItemVariationStore,
    /// Variation indices for advance heights
    pub advanceHeightMapping: Option<Vec<uint32>>,
    /// Variation indices for top side bearings
    pub tsbMapping: Option<Vec<uint32>>,
    /// Variation indices for bottom side bearings
    pub bsbMapping: Option<Vec<uint32>>,
    /// Variation indices for vertical origins
    pub vOrgMapping: Option<Vec<uint32>>,
}
