//! Structures for handling components within a composite glyph

use crate::types::uint16;
use bitflags::bitflags;
use kurbo::Affine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Flags affecting how a component is positioned and scaled.
    ///
    /// Encoding-driven flags (argument widths, "more components") belong to
    /// the binary codec; the ones kept here carry glyph semantics.
    pub struct ComponentFlags: u16 {
        /// Round the component's offset to the pixel grid
        const ROUND_XY_TO_GRID = 0x0004;
        /// The metrics of the composite glyph should be the same as the
        /// metrics of this component
        const USE_MY_METRICS = 0x0200;
        /// The contours of the components overlap
        const OVERLAP_COMPOUND = 0x0400;
        /// The component's offset should be scaled
        const SCALED_COMPONENT_OFFSET = 0x0800;
        /// The component's offset should not be scaled
        const UNSCALED_COMPONENT_OFFSET = 0x1000;
    }
}

impl Serialize for ComponentFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.bits())
    }
}

impl<'de> Deserialize<'de> for ComponentFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u16::deserialize(deserializer)?;
        Ok(ComponentFlags::from_bits_truncate(bits))
    }
}

/// A high-level representation of a component within a glyph
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Component {
    /// The glyph ID that this component references
    pub glyph_index: uint16,
    /// An affine transformation applied to the component's contours
    #[serde(with = "affine_coeffs")]
    pub transformation: Affine,
    /// Alternate, and rarely used, method of positioning components using
    /// contour point numbers
    pub match_points: Option<(uint16, uint16)>,
    /// Flags
    pub flags: ComponentFlags,
}

impl Component {
    /// The translation part of this component's transformation.
    pub fn offset(&self) -> (f64, f64) {
        let [_, _, _, _, translate_x, translate_y] = self.transformation.as_coeffs();
        (translate_x, translate_y)
    }

    /// Replace the translation part of this component's transformation.
    pub fn set_offset(&mut self, x: f64, y: f64) {
        let [a, b, c, d, _, _] = self.transformation.as_coeffs();
        self.transformation = Affine::new([a, b, c, d, x, y]);
    }
}

mod affine_coeffs {
    use kurbo::Affine;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(t: &Affine, serializer: S) -> Result<S::Ok, S::Error> {
        t.as_coeffs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Affine, D::Error> {
        let coeffs = <[f64; 6]>::deserialize(deserializer)?;
        Ok(Affine::new(coeffs))
    }
}
