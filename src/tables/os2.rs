//! The `OS/2` table (the scalar fields the metrics-variation pass can target).

use crate::types::{int16, uint16};
use serde::{Deserialize, Serialize};

/// Represents a font's OS/2 (OS/2 and Windows Metrics) table
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct os2 {
    pub sTypoAscender: int16,
    pub sTypoDescender: int16,
    pub sTypoLineGap: int16,
    pub usWinAscent: uint16,
    pub usWinDescent: uint16,
    pub ySubscriptXSize: int16,
    pub ySubscriptYSize: int16,
    pub ySubscriptXOffset: int16,
    pub ySubscriptYOffset: int16,
    pub ySuperscriptXSize: int16,
    pub ySuperscriptYSize: int16,
    pub ySuperscriptXOffset: int16,
    pub ySuperscriptYOffset: int16,
    pub yStrikeoutSize: int16,
    pub yStrikeoutPosition: int16,
    pub sxHeight: int16,
    pub sCapHeight: int16,
}
