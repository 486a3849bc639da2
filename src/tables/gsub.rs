//! The `GSUB` table: glyph substitution.
//!
//! Only single substitution is decoded here; the script list and remaining
//! lookup types pass through the font I/O layer untouched.

use crate::layout::common::{FeatureRecord, FeatureVariations};
use crate::layout::gsub1::SingleSubst;
use crate::types::uint16;
use serde::{Deserialize, Serialize};

/// A substitution rule within a lookup.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Substitution {
    /// Single substitution (lookup type 1)
    Single(SingleSubst),
}

/// A GSUB lookup.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Lookup {
    /// Lookup qualifiers
    pub flags: uint16,
    /// Mark filtering set, if the flags call for one
    pub mark_filtering_set: Option<uint16>,
    /// The substitution rule
    pub rule: Substitution,
}

/// The Glyph Substitution table
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct GSUB {
    /// The lookup list
    pub lookups: Vec<Lookup>,
    /// The feature list: tags with the lookups they activate
    pub features: Vec<FeatureRecord>,
    /// Feature variations, if the font has condition-gated features
    pub feature_variations: Option<FeatureVariations>,
}
