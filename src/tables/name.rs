//! The `name` table, as decoded string records.
//!
//! Text encoding and decoding for the various platform/encoding pairs is
//! handled by the font I/O layer; the records here carry the decoded text.

use crate::types::uint16;
use serde::{Deserialize, Serialize};

/// A single name record
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct NameRecord {
    pub platformID: uint16,
    pub encodingID: uint16,
    pub languageID: uint16,
    pub nameID: uint16,
    /// The decoded text of this record
    pub string: String,
}

/// Represents a font's name (Naming) table
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct name {
    /// The name records, sorted as in the binary table
    pub records: Vec<NameRecord>,
}

impl name {
    /// The first record with this ID, on any platform.
    pub fn get(&self, name_id: uint16) -> Option<&NameRecord> {
        self.records.iter().find(|record| record.nameID == name_id)
    }

    /// Remove every record with this ID, across platforms.
    pub fn remove_all(&mut self, name_id: uint16) {
        self.records.retain(|record| record.nameID != name_id);
    }
}
