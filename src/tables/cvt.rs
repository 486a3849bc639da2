//! The `cvt ` table: the font's control values, targeted by `cvar` deltas.

use crate::types::int16;
use serde::{Deserialize, Serialize};

/// Represents a font's cvt (Control Value) table
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct cvt(pub Vec<int16>);

impl cvt {
    /// Number of control values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
