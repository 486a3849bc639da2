//! The `hmtx` table: horizontal advances and left side bearings.

use crate::types::{int16, uint16};
use serde::{Deserialize, Serialize};

/// A single horizontal metric
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Metric {
    /// The full horizontal advance width of the glyph
    pub advanceWidth: uint16,
    /// The left side bearing of the glyph
    pub lsb: int16,
}

/// The horizontal metrics table
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct hmtx {
    /// The list of metrics, corresponding to the glyph order
    pub metrics: Vec<Metric>,
}
