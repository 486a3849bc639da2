use serde::{Deserialize, Serialize};

/// A single point on a glyph contour.
///
/// Coordinates are doubles: intermediate instancing arithmetic keeps full
/// precision, and only metric and bounds writes round to font units.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate in font units
    pub x: f64,
    /// Y coordinate in font units
    pub y: f64,
    /// True if this point lies on the curve
    pub on_curve: bool,
}

impl Point {
    /// Shorthand for an on-curve point.
    pub fn onc(x: f64, y: f64) -> Point {
        Point {
            x,
            y,
            on_curve: true,
        }
    }

    /// Apply an affine transformation to this point's coordinates.
    pub fn transform(&self, t: kurbo::Affine) -> Point {
        let kurbo_point = t * kurbo::Point::new(self.x, self.y);
        Point {
            x: kurbo_point.x,
            y: kurbo_point.y,
            on_curve: self.on_curve,
        }
    }
}
