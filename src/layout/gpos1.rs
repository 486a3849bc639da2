//! Single adjustment positioning.

use crate::layout::valuerecord::ValueRecord;
use crate::types::GlyphID;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/* A mapping of GID -> valuerecord is a friendly way to represent what's
going on here; the choice of binary format is made at compile time. */

/// A single positioning subtable.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct SinglePos {
    /// The mapping of input glyph IDs to value records.
    pub mapping: BTreeMap<GlyphID, ValueRecord>,
}
