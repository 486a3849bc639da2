//! Single substitution.

use crate::types::GlyphID;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single substitution subtable.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct SingleSubst {
    /// The mapping of input glyph IDs to replacement glyph IDs.
    pub mapping: BTreeMap<GlyphID, GlyphID>,
}
