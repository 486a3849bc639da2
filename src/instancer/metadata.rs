//! Instancing of the axis metadata tables: `avar`, `fvar`, `STAT`, and the
//! release of name records that nothing references any more.

use crate::error::InstancerError;
use crate::font::Font;
use crate::instancer::limits::{normalize_axis_limits, UserAxisLimits};
use crate::tables::avar::SegmentMap;
use crate::types::{f2dot14_round, Tag};
use std::collections::{BTreeMap, BTreeSet};

/// Rewrite the `avar` table: segment maps for pinned axes disappear, maps
/// for limited axes are renormalised to the restricted extent. If every
/// axis is pinned the table goes away.
pub(crate) fn instantiate_avar(
    font: &mut Font,
    limits: &UserAxisLimits,
) -> Result<(), InstancerError> {
    let (pinned, _) = limits.split_up();
    let axis_tags = font.fvar.as_ref().map(|f| f.axis_tags()).unwrap_or_default();

    if axis_tags.iter().all(|tag| pinned.contains_key(tag)) {
        log::info!("Dropping avar table");
        font.avar = None;
        return Ok(());
    }

    // Ranges in normalized-but-unwarped coordinates: the segment map's own
    // from-coordinates live on that side of the warp.
    let (_, normalized_ranges) = normalize_axis_limits(font, limits, false)?.split_up();

    let avar = match font.avar.as_mut() {
        Some(avar) => avar,
        None => return Ok(()),
    };
    let mut new_maps = vec![];
    for (tag, segment) in axis_tags.iter().zip(avar.maps.iter()) {
        if pinned.contains_key(tag) {
            continue;
        }
        let &(minimum, maximum) = match normalized_ranges.get(tag) {
            Some(range) => range,
            None => {
                new_maps.push(segment.clone());
                continue;
            }
        };
        if !segment.is_valid() {
            new_maps.push(segment.clone());
            continue;
        }
        let mapped_min = f2dot14_round(segment.piecewise_linear_map(minimum));
        let mapped_max = f2dot14_round(segment.piecewise_linear_map(maximum));
        let mut new_mapping: Vec<(f64, f64)> = vec![];
        for &(from, to) in &segment.0 {
            let (mut from_coord, mut to_coord) = (from, to);
            if from_coord < 0.0 {
                if minimum == 0.0 || from_coord < minimum {
                    continue;
                }
                from_coord /= minimum.abs();
            } else if from_coord > 0.0 {
                if maximum == 0.0 || from_coord > maximum {
                    continue;
                }
                from_coord /= maximum;
            }
            if to_coord < 0.0 {
                if mapped_min == 0.0 {
                    continue;
                }
                to_coord = (to_coord / mapped_min.abs()).max(-1.0);
            } else if to_coord > 0.0 {
                if mapped_max == 0.0 {
                    continue;
                }
                to_coord = (to_coord / mapped_max).min(1.0);
            }
            new_mapping.push((f2dot14_round(from_coord), f2dot14_round(to_coord)));
        }
        if !new_mapping.iter().any(|&(from, to)| from == -1.0 && to == -1.0) {
            new_mapping.insert(0, (-1.0, -1.0));
        }
        if !new_mapping.iter().any(|&(from, to)| from == 1.0 && to == 1.0) {
            new_mapping.push((1.0, 1.0));
        }
        new_maps.push(SegmentMap(new_mapping));
    }
    avar.maps = new_maps;
    Ok(())
}

fn instance_within_axis_ranges(
    location: &BTreeMap<Tag, f64>,
    axis_ranges: &BTreeMap<Tag, (f64, f64)>,
) -> bool {
    for (tag, coord) in location {
        if let Some(&(minimum, maximum)) = axis_ranges.get(tag) {
            if *coord < minimum || *coord > maximum {
                return false;
            }
        }
    }
    true
}

/// Rewrite the `fvar` table last of all: pinned axes and the named
/// instances that do not match the pins disappear, limited axes have
/// their user-space extremes tightened. A fully pinned font loses the
/// table entirely.
pub(crate) fn instantiate_fvar(font: &mut Font, limits: &UserAxisLimits) {
    let (pinned, axis_ranges) = limits.split_up();
    let fvar = match font.fvar.as_mut() {
        Some(fvar) => fvar,
        None => return,
    };
    if fvar.axes.iter().all(|axis| pinned.contains_key(&axis.axisTag)) {
        log::info!("Dropping fvar table");
        font.fvar = None;
        return;
    }

    log::info!("Instantiating fvar table");
    let old_axis_tags = fvar.axis_tags();
    let mut new_axes = vec![];
    for axis in fvar.axes.iter_mut() {
        if pinned.contains_key(&axis.axisTag) {
            continue;
        }
        if let Some(&(minimum, maximum)) = axis_ranges.get(&axis.axisTag) {
            axis.minValue = minimum;
            axis.maxValue = maximum;
        }
        new_axes.push(axis.clone());
    }

    let mut new_instances = vec![];
    for instance in fvar.instances.iter_mut() {
        let mut instance_location: BTreeMap<Tag, f64> = old_axis_tags
            .iter()
            .copied()
            .zip(instance.coordinates.iter().copied())
            .collect();

        // Only keep named instances whose coordinates match the pins
        let mut keep = true;
        for (tag, pin) in pinned.iter() {
            match instance_location.remove(tag) {
                Some(coordinate) if (coordinate - pin).abs() <= f64::EPSILON => {}
                _ => {
                    keep = false;
                    break;
                }
            }
        }
        if !keep || !instance_within_axis_ranges(&instance_location, &axis_ranges) {
            continue;
        }
        instance.coordinates = new_axes
            .iter()
            .map(|axis| *instance_location.get(&axis.axisTag).unwrap_or(&0.0))
            .collect();
        new_instances.push(instance.clone());
    }

    fvar.axes = new_axes;
    fvar.instances = new_instances;
}

/// Rewrite the `STAT` table: design-axis records for pinned axes are
/// removed together with every axis value that references them, axis
/// values outside a limited range are removed, and the survivors are
/// re-indexed. A STAT whose design axes are all pinned is dropped.
pub(crate) fn instantiate_stat(font: &mut Font, limits: &UserAxisLimits) {
    let (pinned, axis_ranges) = limits.split_up();
    let stat = match font.stat.as_mut() {
        Some(stat) => stat,
        None => return,
    };
    if stat.design_axes.is_empty() {
        return;
    }
    log::info!("Instantiating STAT table");
    let pinned_axis_indices: BTreeSet<usize> = stat
        .design_axes
        .iter()
        .enumerate()
        .filter(|(_, axis)| pinned.contains_key(&axis.axisTag))
        .map(|(index, _)| index)
        .collect();
    if pinned_axis_indices.len() == stat.design_axes.len() {
        log::info!("Dropping STAT table");
        font.stat = None;
        return;
    }

    let axis_index_map: BTreeMap<u16, u16> = stat
        .design_axes
        .iter()
        .enumerate()
        .filter(|(index, _)| !pinned_axis_indices.contains(index))
        .enumerate()
        .map(|(new_index, (old_index, _))| (old_index as u16, new_index as u16))
        .collect();

    let value_outside_range = |axis_index: u16, value: f64| -> bool {
        let tag = match stat.design_axes.get(axis_index as usize) {
            Some(axis) => axis.axisTag,
            None => return true,
        };
        match axis_ranges.get(&tag) {
            Some(&(minimum, maximum)) => value < minimum || value > maximum,
            None => false,
        }
    };

    let mut new_axis_values = vec![];
    for axis_value in stat.axis_values.iter() {
        let mut axis_value = axis_value.clone();
        if let Some(axis_index) = axis_value.axis_index {
            if pinned_axis_indices.contains(&(axis_index as usize)) {
                continue;
            }
            if let Some(nominal) = axis_value.nominal_value {
                if value_outside_range(axis_index, nominal) {
                    continue;
                }
            }
            axis_value.axis_index = axis_index_map.get(&axis_index).copied();
        }
        if let Some(locations) = &axis_value.locations {
            if locations.iter().any(|(&axis_index, &value)| {
                pinned_axis_indices.contains(&(axis_index as usize))
                    || value_outside_range(axis_index, value)
            }) {
                continue;
            }
            axis_value.locations = Some(
                locations
                    .iter()
                    .map(|(axis_index, &value)| (axis_index_map[axis_index], value))
                    .collect(),
            );
        }
        new_axis_values.push(axis_value);
    }
    stat.axis_values = new_axis_values;
    stat.design_axes = stat
        .design_axes
        .iter()
        .enumerate()
        .filter(|(index, _)| !pinned_axis_indices.contains(index))
        .map(|(_, axis)| axis.clone())
        .collect();
}

/// The name IDs currently referenced by the variation metadata (fvar
/// axes and instances, STAT axes and values).
pub(crate) fn get_variation_name_ids(font: &Font) -> BTreeSet<u16> {
    let mut ids = BTreeSet::new();
    if let Some(fvar) = font.fvar.as_ref() {
        for axis in &fvar.axes {
            ids.insert(axis.axisNameID);
        }
        for instance in &fvar.instances {
            ids.insert(instance.subfamilyNameID);
            if let Some(postscript_name_id) = instance.postscriptNameID {
                ids.insert(postscript_name_id);
            }
        }
    }
    if let Some(stat) = font.stat.as_ref() {
        for axis in &stat.design_axes {
            ids.insert(axis.axisNameID);
        }
        for value in &stat.axis_values {
            ids.insert(value.name_id);
        }
        if let Some(elided) = stat.elided_fallback_name_id {
            ids.insert(elided);
        }
    }
    ids
}

/// Release name records that were referenced by variation metadata before
/// instancing but no longer are. Only font-specific IDs (256 and up) are
/// eligible.
pub(crate) fn prune_unused_names(font: &mut Font, previously_referenced: BTreeSet<u16>) {
    let still_referenced = get_variation_name_ids(font);
    if let Some(name) = font.name.as_mut() {
        for &name_id in previously_referenced.difference(&still_referenced) {
            if name_id >= 256 {
                name.remove_all(name_id);
            }
        }
    }
}
