//! The `hhea` table (the scalar fields the metrics-variation pass can target).

use crate::types::int16;
use serde::{Deserialize, Serialize};

/// Represents a font's hhea (Horizontal Header) table
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct hhea {
    /// Typographic ascent
    pub ascender: int16,
    /// Typographic descent
    pub descender: int16,
    /// Typographic line gap
    pub lineGap: int16,
    /// Used to calculate the slope of the cursor (rise)
    pub caretSlopeRise: int16,
    /// Used to calculate the slope of the cursor (run)
    pub caretSlopeRun: int16,
    /// Shift of the highlight of a slanted caret
    pub caretOffset: int16,
}
