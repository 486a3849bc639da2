//! The `STAT` table: style attributes for the font family.

use crate::types::{uint16, Tag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A design axis record
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AxisRecord {
    /// The four-character tag of the axis being described
    pub axisTag: Tag,
    /// The name ID for entries in the `name` table that give this axis a
    /// display name
    pub axisNameID: uint16,
    /// Sort order of this axis within composed face names
    pub axisOrdering: uint16,
}

// It's probably more rust-like to have an enum here, but the downside of
// that is that it forces users to care about the specific OT format they're
// representing. So this is a maximalist structure which gets resolved to
// the right underlying format on write.

/// An axis value table (underlying format resolved on write)
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AxisValue {
    /// Zero-based index into the axis record array identifying the axis of
    /// design variation to which the axis value table applies. Absent for
    /// format 4 records, which carry a multi-axis location instead.
    pub axis_index: Option<uint16>,
    /// Flags (elidable, older-sibling)
    pub flags: uint16,
    /// The name ID for entries in the `name` table that provide a display
    /// string for this attribute value
    pub name_id: uint16,
    /// A numeric value for this attribute value
    pub nominal_value: Option<f64>,
    /// The minimum and maximum values for a range associated with the
    /// specified name ID
    pub range_min_max: Option<(f64, f64)>,
    /// The numeric value for a style-linked mapping from this value
    pub linked_value: Option<f64>,
    /// A multi-axis location at which this value applies (format 4)
    pub locations: Option<BTreeMap<uint16, f64>>,
}

/// The Style Attributes table
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct STAT {
    /// ID of fallback name when all aspects are elided
    pub elided_fallback_name_id: Option<uint16>,
    /// The design axes array
    pub design_axes: Vec<AxisRecord>,
    /// The axis value table array
    pub axis_values: Vec<AxisValue>,
}
