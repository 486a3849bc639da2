//! The `cvar` table: how the control values vary across the designspace.

use crate::otvar::TupleVariation;
use serde::{Deserialize, Serialize};

/// A CVT Variations table.
///
/// Each variation's delta vector has one (1-dimensional) entry per control
/// value; `None` means the control value does not change in that region.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct cvar {
    pub variations: Vec<TupleVariation>,
}
