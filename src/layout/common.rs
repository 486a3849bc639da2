//! Feature lists and feature variations, shared between GSUB and GPOS.

use crate::types::{uint16, Tag};
use serde::{Deserialize, Serialize};

/// An entry in a table's feature list: a feature tag and the lookups it
/// activates.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// The four-character feature tag (e.g. `liga`, `kern`)
    pub featureTag: Tag,
    /// Indices into the table's lookup list
    pub lookup_indices: Vec<uint16>,
}

/// A single condition gating a feature-variation record.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Condition {
    /// Format 1: an interval on one axis, in normalized coordinates.
    Format1 {
        /// Index of the axis in the fvar axis order
        axis_index: uint16,
        /// Lowest normalized coordinate the condition holds at
        filter_range_min: f64,
        /// Highest normalized coordinate the condition holds at
        filter_range_max: f64,
    },
    /// A condition format this library does not understand. Kept verbatim.
    Unsupported {
        /// The on-disk format number
        format: uint16,
    },
}

/// One feature's replacement within a feature-variation record.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct FeatureTableSubstitutionRecord {
    /// Index of the feature (in the table's feature list) being substituted
    pub feature_index: uint16,
    /// The lookups the substitute feature activates
    pub lookup_indices: Vec<uint16>,
}

/// A condition set plus the feature substitutions to activate when every
/// condition holds.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct FeatureVariationRecord {
    /// Conditions, ANDed together
    pub condition_set: Vec<Condition>,
    /// Feature substitutions applied while the condition set holds
    pub substitutions: Vec<FeatureTableSubstitutionRecord>,
}

/// The feature variations structure of a GSUB or GPOS table.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct FeatureVariations {
    /// The records, evaluated in order; the first record whose condition
    /// set holds wins
    pub records: Vec<FeatureVariationRecord>,
}
