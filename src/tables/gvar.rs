//! The `gvar` table: how glyph outlines vary across the designspace.

use crate::otvar::TupleVariation;
use serde::{Deserialize, Serialize};

/// A Glyph Variations table, describing how glyph outlines vary across the
/// designspace.
///
/// Deltas are the decoded per-point form: each variation's delta vector is
/// indexed like the glyph's coordinate stream (contour points, component
/// offsets, then the four phantom points), with `None` for points whose
/// delta the encoding left to be inferred.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct gvar {
    /// An array of variation data, one entry for each glyph in the `glyf`
    /// table. An empty list means the glyph does not vary.
    pub variations: Vec<Vec<TupleVariation>>,
}

impl gvar {
    /// True when no glyph has any variation left.
    pub fn is_empty(&self) -> bool {
        self.variations.iter().all(|v| v.is_empty())
    }
}
