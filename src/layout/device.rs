//! Device and variation-index tables.
//!
//! Both share one encoding; delta format `0x8000` marks the variation-index
//! form, which is the only one the instancer rewrites. Hinting devices pass
//! through untouched.

use crate::otvar::varidx;
use crate::types::{uint16, uint32};
use serde::{Deserialize, Serialize};

/// A hinting device table: per-ppem pixel adjustments.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct Device {
    /// Smallest size to correct, in ppem
    pub startSize: uint16,
    /// Largest size to correct, in ppem
    pub endSize: uint16,
    /// One adjustment per ppem from `startSize` to `endSize` inclusive
    pub deltaValues: Vec<i8>,
}

/// The two readings of a device table reference.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum DeviceOrVariationIndex {
    /// A hinting device table
    Device(Device),
    /// A variation index table (delta format 0x8000), addressing a row of
    /// the enclosing table's item variation store
    VariationIndex {
        /// Index of the variation data subtable within the store
        outer: uint16,
        /// Row within that subtable
        inner: uint16,
    },
}

impl DeviceOrVariationIndex {
    /// The 32-bit variation index, if this is a variation index table.
    pub fn variation_index(&self) -> Option<uint32> {
        match self {
            DeviceOrVariationIndex::VariationIndex { outer, inner } => {
                Some(varidx(*outer, *inner))
            }
            DeviceOrVariationIndex::Device(_) => None,
        }
    }
}
