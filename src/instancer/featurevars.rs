//! Pruning of feature-variation condition sets.
//!
//! Each record's conditions are evaluated against the restriction: pinned
//! axes turn a condition into a plain boolean, limited axes clip and
//! renormalise its interval. A record whose condition set empties is
//! always active in the surviving design space, so its substitutions move
//! into the default feature list; a record with a failed condition
//! disappears. Conditions in formats this library does not understand are
//! left in place with a warning.

use crate::font::Font;
use crate::instancer::{NormalizedAxisLimit, NormalizedAxisLimits};
use crate::layout::common::{Condition, FeatureRecord, FeatureVariations};
use crate::otvar::normalize_value;
use crate::types::Tag;
use std::collections::BTreeMap;

enum ConditionOutcome {
    /// The condition can never hold in the surviving space
    Never,
    /// The condition always holds in the surviving space
    Always,
    /// The condition still depends on the surviving axes
    Keep(Condition),
}

fn evaluate_condition(
    condition: &Condition,
    fvar_axes: &[Tag],
    axis_limits: &NormalizedAxisLimits,
    axis_index_map: &BTreeMap<u16, u16>,
    record_ix: usize,
    condition_ix: usize,
) -> ConditionOutcome {
    let (axis_index, minimum, maximum) = match condition {
        Condition::Format1 {
            axis_index,
            filter_range_min,
            filter_range_max,
        } => (*axis_index, *filter_range_min, *filter_range_max),
        Condition::Unsupported { format } => {
            log::warn!(
                "Condition table {} of FeatureVariationRecord {} has unsupported format ({}); ignored",
                condition_ix,
                record_ix,
                format
            );
            return ConditionOutcome::Keep(condition.clone());
        }
    };
    let tag = match fvar_axes.get(axis_index as usize) {
        Some(&tag) => tag,
        None => return ConditionOutcome::Keep(condition.clone()),
    };
    match axis_limits.0.get(&tag) {
        None => ConditionOutcome::Keep(Condition::Format1 {
            axis_index: *axis_index_map.get(&axis_index).unwrap_or(&axis_index),
            filter_range_min: minimum,
            filter_range_max: maximum,
        }),
        Some(NormalizedAxisLimit::Pin(value)) => {
            if minimum <= *value && *value <= maximum {
                ConditionOutcome::Always
            } else {
                ConditionOutcome::Never
            }
        }
        Some(NormalizedAxisLimit::Range(range_min, range_max)) => {
            if minimum > maximum || minimum > *range_max || maximum < *range_min {
                return ConditionOutcome::Never;
            }
            let new_min = normalize_value(minimum, (*range_min, 0.0, *range_max));
            let new_max = normalize_value(maximum, (*range_min, 0.0, *range_max));
            if new_min <= -1.0 && new_max >= 1.0 {
                return ConditionOutcome::Always;
            }
            ConditionOutcome::Keep(Condition::Format1 {
                axis_index: *axis_index_map.get(&axis_index).unwrap_or(&axis_index),
                filter_range_min: new_min,
                filter_range_max: new_max,
            })
        }
    }
}

/// Concatenate an always-active record's substitutions into the default
/// feature list, order-preserving and without duplicating lookups.
fn merge_substitutions(
    features: &mut [FeatureRecord],
    substitutions: &[crate::layout::common::FeatureTableSubstitutionRecord],
) {
    for substitution in substitutions {
        if let Some(feature) = features.get_mut(substitution.feature_index as usize) {
            for &lookup in &substitution.lookup_indices {
                if !feature.lookup_indices.contains(&lookup) {
                    feature.lookup_indices.push(lookup);
                }
            }
        } else {
            log::warn!(
                "FeatureVariationRecord names feature index {} outside the feature list",
                substitution.feature_index
            );
        }
    }
}

fn instantiate_table_feature_variations(
    features: &mut [FeatureRecord],
    feature_variations: &mut Option<FeatureVariations>,
    fvar_axes: &[Tag],
    axis_limits: &NormalizedAxisLimits,
) {
    let variations = match feature_variations.as_mut() {
        Some(variations) => variations,
        None => return,
    };
    // Conditions address axes by fvar index; pinned axes vanish from the
    // axis order, so surviving conditions are rebased.
    let pinned = axis_limits.pinned();
    let mut axis_index_map: BTreeMap<u16, u16> = BTreeMap::new();
    let mut new_index = 0u16;
    for (old_index, tag) in fvar_axes.iter().enumerate() {
        if !pinned.contains_key(tag) {
            axis_index_map.insert(old_index as u16, new_index);
            new_index += 1;
        }
    }

    let mut new_records = vec![];
    for (record_ix, record) in variations.records.iter().enumerate() {
        let mut keep_record = true;
        let mut new_conditions = vec![];
        for (condition_ix, condition) in record.condition_set.iter().enumerate() {
            match evaluate_condition(
                condition,
                fvar_axes,
                axis_limits,
                &axis_index_map,
                record_ix,
                condition_ix,
            ) {
                ConditionOutcome::Never => {
                    keep_record = false;
                    break;
                }
                ConditionOutcome::Always => {}
                ConditionOutcome::Keep(condition) => new_conditions.push(condition),
            }
        }
        if !keep_record {
            continue;
        }
        if new_conditions.is_empty() {
            // Unconditionally active in the surviving space
            merge_substitutions(features, &record.substitutions);
        } else {
            let mut record = record.clone();
            record.condition_set = new_conditions;
            new_records.push(record);
        }
    }

    if new_records.is_empty() {
        *feature_variations = None;
    } else {
        variations.records = new_records;
    }
}

/// Prune the feature variations of GSUB and GPOS against the restriction.
pub(crate) fn instantiate_feature_variations(font: &mut Font, axis_limits: &NormalizedAxisLimits) {
    let fvar_axes = match font.fvar.as_ref() {
        Some(fvar) => fvar.axis_tags(),
        None => return,
    };
    if let Some(gsub) = font.gsub.as_mut() {
        instantiate_table_feature_variations(
            &mut gsub.features,
            &mut gsub.feature_variations,
            &fvar_axes,
            axis_limits,
        );
    }
    if let Some(gpos) = font.gpos.as_mut() {
        instantiate_table_feature_variations(
            &mut gpos.features,
            &mut gpos.feature_variations,
            &fvar_axes,
            axis_limits,
        );
    }
}
