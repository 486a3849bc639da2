//! The `MVAR` table: variations of font-wide metric values.

use crate::otvar::ItemVariationStore;
use crate::types::{uint32, Tag};
use serde::{Deserialize, Serialize};

/// Associates one four-character metric tag with a row of the store.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct MvarValueRecord {
    /// Which font-wide value varies (e.g. `xhgt`, `unds`)
    pub valueTag: Tag,
    /// The 32-bit variation index of the deltas for that value
    pub varIdx: uint32,
}

/// Represents a font's MVAR (Metrics Variations) table
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MVAR {
    /// The value records, sorted by tag
    pub valueRecords: Vec<MvarValueRecord>,
    /// The variation store holding the deltas
    pub itemVariationStore: ItemVariationStore,
}
