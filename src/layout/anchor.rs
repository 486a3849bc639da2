//! Anchor tables, used to attach marks and cursive glyphs.

use crate::layout::device::DeviceOrVariationIndex;
use crate::types::{int16, uint16};
use serde::{Deserialize, Serialize};

/// An attachment point on a glyph.
///
/// The binary format is chosen on write: format 3 when a device or
/// variation-index table is present, format 2 when a contour point is
/// given, format 1 otherwise.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Anchor {
    /// X coordinate in design units
    pub xCoordinate: int16,
    /// Y coordinate in design units
    pub yCoordinate: int16,
    /// A contour point the anchor snaps to when the outline is grid-fitted
    pub anchorPoint: Option<uint16>,
    /// Device or variation index table for the X coordinate
    pub xDeviceTable: Option<DeviceOrVariationIndex>,
    /// Device or variation index table for the Y coordinate
    pub yDeviceTable: Option<DeviceOrVariationIndex>,
}

impl Anchor {
    /// An anchor with plain coordinates only.
    pub fn new(x: int16, y: int16) -> Anchor {
        Anchor {
            xCoordinate: x,
            yCoordinate: y,
            ..Default::default()
        }
    }

    /// The binary format this anchor resolves to on write.
    pub fn format(&self) -> uint16 {
        if self.xDeviceTable.is_some() || self.yDeviceTable.is_some() {
            3
        } else if self.anchorPoint.is_some() {
            2
        } else {
            1
        }
    }
}
