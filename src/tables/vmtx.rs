//! The `vmtx` table: vertical advances and top side bearings.

use crate::types::{int16, uint16};
use serde::{Deserialize, Serialize};

/// A single vertical metric
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct VMetric {
    /// The full vertical advance height of the glyph
    pub advanceHeight: uint16,
    /// The top side bearing of the glyph
    pub tsb: int16,
}

/// The vertical metrics table
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct vmtx {
    /// The list of metrics, corresponding to the glyph order
    pub metrics: Vec<VMetric>,
}
