//! Item Variation Store (used in `MVAR`, `HVAR`, `GDEF` and friends).

use crate::otvar::Support;
use crate::types::{uint16, Tag};
use serde::{Deserialize, Serialize};

/// The tent of one axis within a variation region, in normalized coordinates.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct RegionAxisCoordinates {
    pub startCoord: f64,
    pub peakCoord: f64,
    pub endCoord: f64,
}

/// Represents variation data inside an item variation store
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ItemVariationData {
    /// Indices into the store's region list.
    pub region_indexes: Vec<uint16>,
    /// A two-dimensional array of delta values.
    ///
    /// Rows provide sets of deltas for particular target items, and columns
    /// correspond to the regions named in `region_indexes`.
    pub delta_values: Vec<Vec<i32>>,
}

impl ItemVariationData {
    /// Number of items (rows) covered by this subtable.
    pub fn item_count(&self) -> usize {
        self.delta_values.len()
    }
}

/// An item variation store, collecting a set of variation data for scalar values.
///
/// Items are addressed by a 32-bit variation index whose upper 16 bits select
/// the variation data subtable and whose lower 16 bits select the row.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ItemVariationStore {
    /// The number of variation axes in this font.
    pub axisCount: uint16,
    /// The variation regions used in this store, one tent per axis in
    /// fvar order.
    pub variationRegions: Vec<Vec<RegionAxisCoordinates>>,
    /// A list of item variation subtables.
    pub variationData: Vec<ItemVariationData>,
}

impl ItemVariationStore {
    /// True if the store retains no variation data at all.
    pub fn is_empty(&self) -> bool {
        self.variationData.is_empty() || self.variationRegions.is_empty()
    }

    /// The region at `index` as a sparse per-axis support map. Axes whose
    /// tent is `(0, 0, 0)` do not constrain the region and are omitted.
    pub fn region_support(&self, axis_order: &[Tag], index: usize) -> Support {
        let mut support = Support::new();
        for (tag, coords) in axis_order.iter().zip(self.variationRegions[index].iter()) {
            let triple = (coords.startCoord, coords.peakCoord, coords.endCoord);
            if triple != (0.0, 0.0, 0.0) {
                support.insert(*tag, triple);
            }
        }
        support
    }

    /// Expand a sparse support map back into a dense per-axis region row.
    pub fn region_from_support(support: &Support, axis_order: &[Tag]) -> Vec<RegionAxisCoordinates> {
        axis_order
            .iter()
            .map(|tag| {
                let (start, peak, end) = support.get(tag).copied().unwrap_or((0.0, 0.0, 0.0));
                RegionAxisCoordinates {
                    startCoord: start,
                    peakCoord: peak,
                    endCoord: end,
                }
            })
            .collect()
    }
}

/// Combine a variation data index and a row index into a 32-bit variation index.
pub fn varidx(outer: u16, inner: u16) -> u32 {
    ((outer as u32) << 16) | inner as u32
}

/// Split a 32-bit variation index into (variation data index, row index).
pub fn varidx_split(index: u32) -> (u16, u16) {
    ((index >> 16) as u16, (index & 0xFFFF) as u16)
}
