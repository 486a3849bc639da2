//! The `glyf` table: TrueType glyph outlines.

mod component;
mod glyph;
mod point;

pub use component::{Component, ComponentFlags};
pub use glyph::Glyph;
pub use point::Point;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Represents a font's glyf (Glyph Data) table
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct glyf {
    /// A list of glyphs, following the font's glyph order
    pub glyphs: Vec<Glyph>,
}

impl glyf {
    /// Every point that contributes to a glyph's bounding box, with
    /// component points transformed into the parent glyph's coordinate
    /// system, recursively.
    pub fn contributing_points(&self, glyph_ix: usize) -> Vec<(f64, f64)> {
        let mut seen = HashSet::new();
        self.points_with_guard(glyph_ix, kurbo::Affine::IDENTITY, &mut seen)
    }

    fn points_with_guard(
        &self,
        glyph_ix: usize,
        transform: kurbo::Affine,
        seen: &mut HashSet<usize>,
    ) -> Vec<(f64, f64)> {
        if !seen.insert(glyph_ix) {
            log::error!("Cyclic component reference involving glyph {}", glyph_ix);
            return vec![];
        }
        let mut points = vec![];
        let glyph = match self.glyphs.get(glyph_ix) {
            Some(g) => g,
            None => {
                log::error!("Component not found for ID={:?}", glyph_ix);
                return vec![];
            }
        };
        for point in glyph.contours.iter().flatten() {
            let transformed = point.transform(transform);
            points.push((transformed.x, transformed.y));
        }
        for comp in &glyph.components {
            points.extend(self.points_with_guard(
                comp.glyph_index as usize,
                transform * comp.transformation,
                seen,
            ));
        }
        seen.remove(&glyph_ix);
        points
    }

    /// Recompute a glyph's bounding box from its own contours and its
    /// components' (already instanced) outlines.
    pub fn recalc_bounds(&mut self, glyph_ix: usize) {
        let points = self.contributing_points(glyph_ix);
        let glyph = &mut self.glyphs[glyph_ix];
        if points.is_empty() {
            glyph.set_bounds_rect(kurbo::Rect::ZERO);
            return;
        }
        let mut rect = kurbo::Rect::new(points[0].0, points[0].1, points[0].0, points[0].1);
        for &(x, y) in &points[1..] {
            rect = rect.union_pt(kurbo::Point::new(x, y));
        }
        glyph.set_bounds_rect(rect);
    }

    /// How deeply nested a glyph's components are: 0 for simple glyphs,
    /// 1 for a composite of simple glyphs, and so on. Used to order
    /// instancing so base glyphs are finished before their dependents.
    pub fn composite_depth(&self, glyph_ix: usize) -> usize {
        let mut seen = HashSet::new();
        self.depth_with_guard(glyph_ix, &mut seen)
    }

    fn depth_with_guard(&self, glyph_ix: usize, seen: &mut HashSet<usize>) -> usize {
        if !seen.insert(glyph_ix) {
            return 0;
        }
        let depth = match self.glyphs.get(glyph_ix) {
            Some(glyph) if glyph.has_components() => {
                1 + glyph
                    .components
                    .iter()
                    .map(|comp| self.depth_with_guard(comp.glyph_index as usize, seen))
                    .max()
                    .unwrap_or(0)
            }
            _ => 0,
        };
        seen.remove(&glyph_ix);
        depth
    }
}
