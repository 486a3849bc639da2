//! The `post` table (the scalar fields the metrics-variation pass can target).

use crate::types::int16;
use serde::{Deserialize, Serialize};

/// Represents a font's post (PostScript information) table
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct post {
    /// Suggested distance of the top of the underline from the baseline
    pub underlinePosition: int16,
    /// Suggested thickness for underlines
    pub underlineThickness: int16,
}
