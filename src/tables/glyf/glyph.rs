use super::component::Component;
use super::point::Point;
use crate::types::int16;
use serde::{Deserialize, Serialize};

/// A higher-level representation of a TrueType outline glyph.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Glyph {
    /// The minimum X coordinate of points (including transformed component points) within this glyph
    pub xMin: int16,
    /// The minimum Y coordinate of points (including transformed component points) within this glyph
    pub yMin: int16,
    /// The maximum X coordinate of points (including transformed component points) within this glyph
    pub xMax: int16,
    /// The maximum Y coordinate of points (including transformed component points) within this glyph
    pub yMax: int16,
    /// A list of contours, each contour represented as a list of `Point` objects
    pub contours: Vec<Vec<Point>>,
    /// TrueType instructions (binary)
    pub instructions: Vec<u8>,
    /// A vector of components
    pub components: Vec<Component>,
    /// The overlap flag, set on statically instanced fonts for the benefit
    /// of the macOS rasterizer
    pub overlap: bool,
}

impl Glyph {
    /// An empty glyph with no contours and no components.
    pub fn empty() -> Glyph {
        Glyph {
            xMin: 0,
            yMin: 0,
            xMax: 0,
            yMax: 0,
            contours: vec![],
            instructions: vec![],
            components: vec![],
            overlap: false,
        }
    }

    /// Returns true if this glyph has any components
    pub fn has_components(&self) -> bool {
        !self.components.is_empty()
    }

    /// Returns true if this glyph has neither components nor contours
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.contours.is_empty()
    }

    /// Number of points in this glyph (without counting components)
    pub fn num_points(&self) -> usize {
        self.contours.iter().map(|c| c.len()).sum()
    }

    /// Returns a bounding box rectangle for this glyph as a `kurbo::Rect`.
    pub fn bounds_rect(&self) -> kurbo::Rect {
        kurbo::Rect::new(
            self.xMin.into(),
            self.yMin.into(),
            self.xMax.into(),
            self.yMax.into(),
        )
    }

    /// Sets the bounding box rectangle for this glyph from a `kurbo::Rect`.
    pub fn set_bounds_rect(&mut self, r: kurbo::Rect) {
        self.xMin = crate::types::ot_round(r.min_x()) as i16;
        self.yMin = crate::types::ot_round(r.min_y()) as i16;
        self.xMax = crate::types::ot_round(r.max_x()) as i16;
        self.yMax = crate::types::ot_round(r.max_y()) as i16;
    }

    /// The coordinate stream `gvar` deltas apply to, without the four
    /// phantom points: every contour point, then one translation point per
    /// component. The second value lists the final index of each "contour"
    /// (components count as single-point contours for interpolation
    /// purposes).
    pub fn coordinates_and_ends(&self) -> (Vec<(f64, f64)>, Vec<usize>) {
        let mut ends: Vec<usize> = self
            .contours
            .iter()
            .map(|c| c.len())
            .scan(0, |acc, x| {
                *acc += x;
                Some(*acc - 1)
            })
            .collect();

        let mut coords: Vec<(f64, f64)> = self
            .contours
            .iter()
            .flatten()
            .map(|pt| (pt.x, pt.y))
            .collect();
        for comp in &self.components {
            let (translate_x, translate_y) = comp.offset();
            coords.push((translate_x, translate_y));
            ends.push(ends.iter().max().map(|x| x + 1).unwrap_or(0));
        }
        (coords, ends)
    }

    /// Write a coordinate stream produced by `coordinates_and_ends` (and
    /// possibly moved by deltas) back into the glyph.
    pub fn set_coordinates(&mut self, coords: &[(f64, f64)]) {
        let mut stream = coords.iter();
        for contour in self.contours.iter_mut() {
            for point in contour.iter_mut() {
                let &(x, y) = stream.next().expect("Not enough coordinates for glyph");
                point.x = x;
                point.y = y;
            }
        }
        for comp in self.components.iter_mut() {
            let &(x, y) = stream.next().expect("Not enough coordinates for glyph");
            comp.set_offset(x, y);
        }
    }
}
