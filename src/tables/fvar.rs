//! The `fvar` table: the font's axes of variation and its named instances.

use crate::types::{uint16, Tag, Tuple};
use serde::{Deserialize, Serialize};

/// A single axis of variation
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct VariationAxisRecord {
    /// The four-character tag identifying this axis
    pub axisTag: Tag,
    /// The lowest user-space coordinate on this axis
    pub minValue: f64,
    /// The default user-space coordinate
    pub defaultValue: f64,
    /// The highest user-space coordinate on this axis
    pub maxValue: f64,
    /// Axis qualifiers (hidden, etc.)
    pub flags: uint16,
    /// The name ID for entries in the `name` table that give this axis a
    /// display name
    pub axisNameID: uint16,
}

impl VariationAxisRecord {
    /// The user-space domain of this axis as a `(min, default, max)` triple.
    pub fn triple(&self) -> (f64, f64, f64) {
        (self.minValue, self.defaultValue, self.maxValue)
    }
}

/// Struct representing a named instance within the variable font's design space
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct InstanceRecord {
    /// The name ID for entries in the `name` table that provide subfamily
    /// names for this instance
    pub subfamilyNameID: uint16,
    /// Flags (unused)
    pub flags: uint16,
    /// Location of this instance in the design space, in user coordinates,
    /// one per axis in axis order
    pub coordinates: Tuple,
    /// The name ID for entries in the `name` table that provide PostScript
    /// names for this instance
    pub postscriptNameID: Option<uint16>,
}

/// Represents a font's fvar (Font Variations) table
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct fvar {
    /// The font's axes of variation
    pub axes: Vec<VariationAxisRecord>,
    /// Any named instances within the design space
    pub instances: Vec<InstanceRecord>,
}

impl fvar {
    /// All axis tags, in axis order.
    pub fn axis_tags(&self) -> Vec<Tag> {
        self.axes.iter().map(|axis| axis.axisTag).collect()
    }

    /// The axis record for a given tag, if the font has that axis.
    pub fn axis(&self, tag: Tag) -> Option<&VariationAxisRecord> {
        self.axes.iter().find(|axis| axis.axisTag == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag;

    pub(crate) fn test_axes() -> Vec<VariationAxisRecord> {
        vec![
            VariationAxisRecord {
                axisTag: tag!("wght"),
                minValue: 100.0,
                defaultValue: 400.0,
                maxValue: 900.0,
                flags: 0,
                axisNameID: 256,
            },
            VariationAxisRecord {
                axisTag: tag!("wdth"),
                minValue: 70.0,
                defaultValue: 100.0,
                maxValue: 100.0,
                flags: 0,
                axisNameID: 257,
            },
        ]
    }

    #[test]
    fn test_axis_lookup() {
        let table = fvar {
            axes: test_axes(),
            instances: vec![],
        };
        assert_eq!(table.axis_tags(), vec![tag!("wght"), tag!("wdth")]);
        assert_eq!(table.axis(tag!("wght")).unwrap().triple(), (100.0, 400.0, 900.0));
        assert!(table.axis(tag!("opsz")).is_none());
    }
}
