//! Axis limits, in user space and in normalized space.

use crate::error::InstancerError;
use crate::font::Font;
use crate::otvar::{normalize_value, Location};
use crate::tables::avar::SegmentMap;
use crate::types::{f2dot14_round, Tag};
use std::collections::BTreeMap;

/// A user-space range an axis is to be restricted to. The axis default
/// must lie within the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub minimum: f64,
    pub maximum: f64,
}

impl AxisRange {
    pub fn new(minimum: f64, maximum: f64) -> Self {
        if maximum < minimum {
            panic!("Range minimum must not be more than maximum");
        }
        AxisRange { minimum, maximum }
    }
}

/// What the caller wants done with one axis, in user coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserAxisLimit {
    /// Fix the axis at a single value and remove it
    Pin(f64),
    /// Restrict the axis to a sub-range, keeping it variable
    Range(AxisRange),
    /// Fix the axis at its default value and remove it
    Drop,
}

/// The caller's requested restriction, one entry per restricted axis.
/// Axes not named stay fully variable.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAxisLimits(pub BTreeMap<Tag, UserAxisLimit>);

impl UserAxisLimits {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Separate the limits into pinned locations and axis ranges.
    /// `Drop` entries are resolved by [`populate_axis_defaults`] and do not
    /// appear in either half.
    pub fn split_up(&self) -> (Location, BTreeMap<Tag, (f64, f64)>) {
        let mut pinned: Location = BTreeMap::new();
        let mut ranges: BTreeMap<Tag, (f64, f64)> = BTreeMap::new();
        for (&tag, limit) in &self.0 {
            match limit {
                UserAxisLimit::Pin(value) => {
                    pinned.insert(tag, *value);
                }
                UserAxisLimit::Range(AxisRange { minimum, maximum }) => {
                    ranges.insert(tag, (*minimum, *maximum));
                }
                UserAxisLimit::Drop => {}
            }
        }
        (pinned, ranges)
    }
}

/// A single axis restriction in normalized coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalizedAxisLimit {
    /// The axis is pinned at this normalized value
    Pin(f64),
    /// The axis is limited to this normalized range (minimum, maximum)
    Range(f64, f64),
}

/// The restriction of [`UserAxisLimits`], mapped through the axis domains
/// and any `avar` segment maps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedAxisLimits(pub BTreeMap<Tag, NormalizedAxisLimit>);

impl NormalizedAxisLimits {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Separate the limits into pinned locations and axis ranges.
    pub fn split_up(&self) -> (Location, BTreeMap<Tag, (f64, f64)>) {
        let mut pinned: Location = BTreeMap::new();
        let mut ranges: BTreeMap<Tag, (f64, f64)> = BTreeMap::new();
        for (&tag, limit) in &self.0 {
            match limit {
                NormalizedAxisLimit::Pin(value) => {
                    pinned.insert(tag, *value);
                }
                NormalizedAxisLimit::Range(minimum, maximum) => {
                    ranges.insert(tag, (*minimum, *maximum));
                }
            };
        }
        (pinned, ranges)
    }

    /// The pinned half of the limits.
    pub fn pinned(&self) -> Location {
        self.split_up().0
    }
}

/// Replace every `Drop` with a pin at the axis default.
pub fn populate_axis_defaults(
    font: &Font,
    mut limits: UserAxisLimits,
) -> Result<UserAxisLimits, InstancerError> {
    let fvar = font
        .fvar
        .as_ref()
        .ok_or_else(|| InstancerError::StructuralError("Missing required table fvar".into()))?;
    for (tag, limit) in limits.0.iter_mut() {
        if matches!(limit, UserAxisLimit::Drop) {
            let axis = fvar.axis(*tag).ok_or(InstancerError::UnknownAxis(*tag))?;
            *limit = UserAxisLimit::Pin(axis.defaultValue);
        }
    }
    Ok(limits)
}

fn normalize(value: f64, triple: (f64, f64, f64), avar_segment: Option<&SegmentMap>) -> f64 {
    let mut value = normalize_value(value, triple);
    if let Some(map) = avar_segment {
        value = map.piecewise_linear_map(value);
    }
    f2dot14_round(value)
}

/// Map user-space limits into normalized coordinates, through the fvar
/// axis domains and (optionally) the avar segment maps.
///
/// Pins are clamped to the axis domain. A range that does not contain the
/// axis default is refused; each endpoint is normalized independently.
pub fn normalize_axis_limits(
    font: &Font,
    limits: &UserAxisLimits,
    use_avar: bool,
) -> Result<NormalizedAxisLimits, InstancerError> {
    let fvar = font
        .fvar
        .as_ref()
        .ok_or_else(|| InstancerError::StructuralError("Missing required table fvar".into()))?;
    let avar_maps = if use_avar { font.avar.as_ref() } else { None };

    let mut normalized = BTreeMap::new();
    for (&tag, limit) in &limits.0 {
        let (axis_index, axis) = fvar
            .axes
            .iter()
            .enumerate()
            .find(|(_, axis)| axis.axisTag == tag)
            .ok_or(InstancerError::UnknownAxis(tag))?;
        let triple = axis.triple();
        let avar_segment = avar_maps.and_then(|avar| avar.maps.get(axis_index));
        match limit {
            UserAxisLimit::Pin(value) => {
                normalized.insert(
                    tag,
                    NormalizedAxisLimit::Pin(normalize(*value, triple, avar_segment)),
                );
            }
            UserAxisLimit::Range(AxisRange { minimum, maximum }) => {
                let (_, default, _) = triple;
                if *minimum > default || *maximum < default {
                    return Err(InstancerError::OutOfRange {
                        axis: tag,
                        minimum: *minimum,
                        maximum: *maximum,
                        default,
                    });
                }
                normalized.insert(
                    tag,
                    NormalizedAxisLimit::Range(
                        normalize(*minimum, triple, avar_segment),
                        normalize(*maximum, triple, avar_segment),
                    ),
                );
            }
            UserAxisLimit::Drop => {
                let (_, default, _) = triple;
                normalized.insert(
                    tag,
                    NormalizedAxisLimit::Pin(normalize(default, triple, avar_segment)),
                );
            }
        }
    }
    Ok(NormalizedAxisLimits(normalized))
}
