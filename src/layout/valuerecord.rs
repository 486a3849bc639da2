//! GPOS value records.

use crate::layout::device::DeviceOrVariationIndex;
use crate::types::int16;
use serde::{Deserialize, Serialize};

/// A GPOS value record: optional adjustments to a glyph's placement and
/// advance, each optionally backed by a device or variation-index table.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct ValueRecord {
    pub xPlacement: Option<int16>,
    pub yPlacement: Option<int16>,
    pub xAdvance: Option<int16>,
    pub yAdvance: Option<int16>,
    pub xPlaDevice: Option<DeviceOrVariationIndex>,
    pub yPlaDevice: Option<DeviceOrVariationIndex>,
    pub xAdvDevice: Option<DeviceOrVariationIndex>,
    pub yAdvDevice: Option<DeviceOrVariationIndex>,
}

impl ValueRecord {
    /// Creates a value record
    pub fn new() -> ValueRecord {
        ValueRecord::default()
    }

    /// Replaces `Some(0)` scalar fields with `None` to provide a compact
    /// representation of a value record
    pub fn simplify(&mut self) {
        for field in [
            &mut self.xPlacement,
            &mut self.yPlacement,
            &mut self.xAdvance,
            &mut self.yAdvance,
        ] {
            if *field == Some(0) {
                *field = None;
            }
        }
    }

    /// True if any field carries a device or variation index table.
    pub fn has_device(&self) -> bool {
        self.xPlaDevice.is_some()
            || self.yPlaDevice.is_some()
            || self.xAdvDevice.is_some()
            || self.yAdvDevice.is_some()
    }
}

/// Helper macro to create valuerecords from fields.
#[macro_export]
macro_rules! valuerecord {
        ($($k:ident = $v:expr),* $(,)?) => {{
                #[allow(unused_mut)]
            let mut v = $crate::layout::valuerecord::ValueRecord::new();
            $( v.$k = Some($v); )*
            v
        }};
    }
