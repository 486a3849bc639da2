//! Rewriting of layout-table scalars when their variation deltas go away.
//!
//! GPOS value records, anchors and GDEF ligature carets carry variation
//! index references into the GDEF item variation store. After the store is
//! instanced, each reference either survives (with a rewritten index) or
//! collapses: the default delta is folded into the scalar and the field
//! reverts to its non-variable form.

use crate::font::Font;
use crate::instancer::itemvar::instantiate_item_variation_store;
use crate::instancer::NormalizedAxisLimits;
use crate::layout::anchor::Anchor;
use crate::layout::device::DeviceOrVariationIndex;
use crate::layout::valuerecord::ValueRecord;
use crate::otvar::varidx_split;
use crate::tables::gdef::CaretValue;
use crate::tables::gpos::Positioning;
use crate::types::{int16, Tag};
use std::collections::BTreeMap;

/// Fold the default delta of a device slot into its scalar and rewrite or
/// drop the slot. Returns the delta that was applied. Hinting device
/// tables pass through untouched.
fn instantiate_device_slot(
    slot: &mut Option<DeviceOrVariationIndex>,
    default_deltas: &BTreeMap<u32, i32>,
    remap: &BTreeMap<u32, u32>,
) -> i32 {
    let index = match slot {
        Some(device) => match device.variation_index() {
            Some(index) => index,
            None => return 0,
        },
        None => return 0,
    };
    let delta = default_deltas.get(&index).copied().unwrap_or(0);
    match remap.get(&index) {
        Some(&new_index) => {
            let (outer, inner) = varidx_split(new_index);
            *slot = Some(DeviceOrVariationIndex::VariationIndex { outer, inner });
        }
        None => *slot = None,
    }
    delta
}

fn add_delta(value: &mut Option<int16>, delta: i32) {
    if delta != 0 {
        *value = Some((value.unwrap_or(0) as i32 + delta) as i16);
    }
}

fn instantiate_value_record(
    record: &mut ValueRecord,
    default_deltas: &BTreeMap<u32, i32>,
    remap: &BTreeMap<u32, u32>,
) {
    let delta = instantiate_device_slot(&mut record.xPlaDevice, default_deltas, remap);
    add_delta(&mut record.xPlacement, delta);
    let delta = instantiate_device_slot(&mut record.yPlaDevice, default_deltas, remap);
    add_delta(&mut record.yPlacement, delta);
    let delta = instantiate_device_slot(&mut record.xAdvDevice, default_deltas, remap);
    add_delta(&mut record.xAdvance, delta);
    let delta = instantiate_device_slot(&mut record.yAdvDevice, default_deltas, remap);
    add_delta(&mut record.yAdvance, delta);
}

fn instantiate_anchor(
    anchor: &mut Anchor,
    default_deltas: &BTreeMap<u32, i32>,
    remap: &BTreeMap<u32, u32>,
) {
    let delta = instantiate_device_slot(&mut anchor.xDeviceTable, default_deltas, remap);
    anchor.xCoordinate = (anchor.xCoordinate as i32 + delta) as i16;
    let delta = instantiate_device_slot(&mut anchor.yDeviceTable, default_deltas, remap);
    anchor.yCoordinate = (anchor.yCoordinate as i32 + delta) as i16;
}

fn instantiate_caret_value(
    caret: &mut CaretValue,
    default_deltas: &BTreeMap<u32, i32>,
    remap: &BTreeMap<u32, u32>,
) {
    if let CaretValue::Format3 { coordinate, device } = caret {
        let mut slot = Some(device.clone());
        let delta = instantiate_device_slot(&mut slot, default_deltas, remap);
        let coordinate = (*coordinate as i32 + delta) as i16;
        *caret = match slot {
            Some(device) => CaretValue::Format3 { coordinate, device },
            None => CaretValue::Format1 { coordinate },
        };
    }
}

/// Instantiate the GDEF item variation store and rewrite every scalar in
/// GDEF/GPOS that references it. An emptied store is removed (the GDEF
/// version downgrade follows from the derived minor version), and a GDEF
/// left with no other content is dropped from the font.
pub(crate) fn instantiate_otl(
    font: &mut Font,
    axis_order: &[Tag],
    axis_limits: &NormalizedAxisLimits,
) {
    let gdef = match font.gdef.as_mut() {
        Some(gdef) => gdef,
        None => return,
    };
    let store = match gdef.item_variation_store.as_mut() {
        Some(store) => store,
        None => return,
    };
    log::info!("Instantiating GDEF/GPOS tables");
    let (default_deltas, remap) = instantiate_item_variation_store(store, axis_order, axis_limits);
    let store_empty = store.is_empty();

    for carets in gdef.ligature_caret_list.values_mut() {
        for caret in carets.iter_mut() {
            instantiate_caret_value(caret, &default_deltas, &remap);
        }
    }
    if store_empty {
        gdef.item_variation_store = None;
    }
    if gdef.is_empty() {
        log::info!("Dropping GDEF table");
        font.gdef = None;
    }

    if let Some(gpos) = font.gpos.as_mut() {
        for lookup in gpos.lookups.iter_mut() {
            match &mut lookup.rule {
                Positioning::Single(subtable) => {
                    for record in subtable.mapping.values_mut() {
                        instantiate_value_record(record, &default_deltas, &remap);
                    }
                }
                Positioning::Pair(subtable) => {
                    for pair in subtable.pairs.iter_mut() {
                        instantiate_value_record(&mut pair.value_record_1, &default_deltas, &remap);
                        instantiate_value_record(&mut pair.value_record_2, &default_deltas, &remap);
                    }
                }
                Positioning::MarkToBase(subtable) => {
                    for mark in subtable.marks.values_mut() {
                        instantiate_anchor(&mut mark.mark_anchor, &default_deltas, &remap);
                    }
                    for anchors in subtable.bases.values_mut() {
                        for anchor in anchors.iter_mut().flatten() {
                            instantiate_anchor(anchor, &default_deltas, &remap);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::btreemap;
    use crate::instancer::NormalizedAxisLimit;
    use crate::layout::gpos2::{PairPos, PairValueRecord};
    use crate::layout::gpos4::{MarkBasePos, MarkRecord};
    use crate::otvar::{ItemVariationData, ItemVariationStore, Support};
    use crate::tables::gdef::{GlyphClass, GDEF};
    use crate::tables::gpos::{Lookup, GPOS};
    use crate::tag;
    use crate::types::Tag;
    use pretty_assertions::assert_eq;

    fn limits(location: &[(Tag, f64)]) -> NormalizedAxisLimits {
        NormalizedAxisLimits(
            location
                .iter()
                .map(|&(tag, v)| (tag, NormalizedAxisLimit::Pin(v)))
                .collect(),
        )
    }

    fn varindex(outer: u16, inner: u16) -> DeviceOrVariationIndex {
        DeviceOrVariationIndex::VariationIndex { outer, inner }
    }

    /// A store with the four regions a 3x3 master setup generates, with
    /// one row per varying scalar: row 0 is the ligature caret / anchor X
    /// (±60 along wght, ±10 along wdth), row 1 the kern value (∓25, ∓5).
    fn test_store() -> ItemVariationStore {
        let axis_order = vec![tag!("wght"), tag!("wdth")];
        let regions: Vec<Support> = vec![
            btreemap!(tag!("wght") => (-1.0, -1.0, 0.0)),
            btreemap!(tag!("wght") => (0.0, 1.0, 1.0)),
            btreemap!(tag!("wdth") => (-1.0, -1.0, 0.0)),
            btreemap!(tag!("wdth") => (0.0, 1.0, 1.0)),
        ];
        ItemVariationStore {
            axisCount: 2,
            variationRegions: regions
                .iter()
                .map(|region| ItemVariationStore::region_from_support(region, &axis_order))
                .collect(),
            variationData: vec![ItemVariationData {
                region_indexes: vec![0, 1, 2, 3],
                delta_values: vec![vec![-60, 60, -10, 10], vec![25, -25, 5, -5]],
            }],
        }
    }

    fn test_font() -> Font {
        let mut font = Font::new();
        font.gdef = Some(GDEF {
            glyph_class: btreemap!(1 => GlyphClass::BaseGlyph),
            ligature_caret_list: btreemap!(
                3 => vec![CaretValue::Format3 {
                    coordinate: 170,
                    device: varindex(0, 0),
                }]
            ),
            item_variation_store: Some(test_store()),
            ..Default::default()
        });
        font.gpos = Some(GPOS {
            lookups: vec![
                Lookup {
                    flags: 0,
                    mark_filtering_set: None,
                    rule: Positioning::MarkToBase(MarkBasePos {
                        marks: btreemap!(
                            2 => MarkRecord {
                                mark_class: 0,
                                mark_anchor: Anchor::new(150, -10),
                            }
                        ),
                        bases: btreemap!(
                            1 => vec![Some(Anchor {
                                xCoordinate: 270,
                                yCoordinate: 450,
                                anchorPoint: None,
                                xDeviceTable: Some(varindex(0, 0)),
                                yDeviceTable: None,
                            })]
                        ),
                    }),
                },
                Lookup {
                    flags: 0,
                    mark_filtering_set: None,
                    rule: Positioning::Pair(PairPos {
                        pairs: vec![PairValueRecord {
                            first: 1,
                            second: 2,
                            value_record_1: ValueRecord {
                                xAdvance: Some(-110),
                                xAdvDevice: Some(varindex(0, 1)),
                                ..Default::default()
                            },
                            value_record_2: ValueRecord::default(),
                        }],
                    }),
                },
            ],
            features: vec![],
            feature_variations: None,
        });
        font
    }

    fn caret_of(font: &Font) -> &CaretValue {
        &font.gdef.as_ref().unwrap().ligature_caret_list[&3][0]
    }

    fn base_anchor_of(font: &Font) -> &Anchor {
        font.gpos.as_ref().unwrap().lookups[0]
            .rule
            .as_mark_base()
            .bases[&1][0]
            .as_ref()
            .unwrap()
    }

    fn kern_record_of(font: &Font) -> &ValueRecord {
        match &font.gpos.as_ref().unwrap().lookups[1].rule {
            Positioning::Pair(pair) => &pair.pairs[0].value_record_1,
            _ => unreachable!(),
        }
    }

    impl Positioning {
        fn as_mark_base(&self) -> &MarkBasePos {
            match self {
                Positioning::MarkToBase(subtable) => subtable,
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn test_pin_and_drop_axis() {
        let axis_order = vec![tag!("wght"), tag!("wdth")];
        for (location, caret, kern) in [
            (vec![(tag!("wght"), -1.0)], 110, -85),
            (vec![(tag!("wght"), 0.0)], 170, -110),
            (vec![(tag!("wght"), 0.5)], 200, -122),
            (vec![(tag!("wght"), 1.0)], 230, -135),
            (vec![(tag!("wdth"), -1.0)], 160, -105),
            (vec![(tag!("wdth"), -0.3)], 167, -108),
            (vec![(tag!("wdth"), 0.0)], 170, -110),
            (vec![(tag!("wdth"), 1.0)], 180, -115),
        ] {
            let mut font = test_font();
            instantiate_otl(&mut font, &axis_order, &limits(&location));
            // The other axis still varies: fields stay variable
            let gdef = font.gdef.as_ref().unwrap();
            assert_eq!(gdef.minor_version(), 3);
            match caret_of(&font) {
                CaretValue::Format3 { coordinate, device } => {
                    assert_eq!(*coordinate, caret, "at {:?}", location);
                    assert!(device.variation_index().is_some());
                }
                other => panic!("caret collapsed: {:?}", other),
            }
            let anchor = base_anchor_of(&font);
            assert_eq!(anchor.xCoordinate, caret + 100, "at {:?}", location);
            assert_eq!(anchor.yCoordinate, 450);
            assert!(anchor.xDeviceTable.is_some());
            assert!(anchor.yDeviceTable.is_none());
            let kern_record = kern_record_of(&font);
            assert_eq!(kern_record.xAdvance, Some(kern), "at {:?}", location);
            assert!(kern_record.xAdvDevice.is_some());
        }
    }

    #[test]
    fn test_full_instance() {
        let axis_order = vec![tag!("wght"), tag!("wdth")];
        for (location, caret, kern) in [
            (vec![(tag!("wght"), -1.0), (tag!("wdth"), -1.0)], 100, -80),
            (vec![(tag!("wght"), -1.0), (tag!("wdth"), 0.0)], 110, -85),
            (vec![(tag!("wght"), -1.0), (tag!("wdth"), 1.0)], 120, -90),
            (vec![(tag!("wght"), 0.0), (tag!("wdth"), 0.0)], 170, -110),
            (vec![(tag!("wght"), 1.0), (tag!("wdth"), -1.0)], 220, -130),
            (vec![(tag!("wght"), 1.0), (tag!("wdth"), 1.0)], 240, -140),
        ] {
            let mut font = test_font();
            instantiate_otl(&mut font, &axis_order, &limits(&location));
            // GDEF keeps its glyph classes but loses the store
            let gdef = font.gdef.as_ref().unwrap();
            assert_eq!(gdef.minor_version(), 0);
            assert!(gdef.item_variation_store.is_none());
            assert_eq!(
                caret_of(&font),
                &CaretValue::Format1 { coordinate: caret },
                "at {:?}",
                location
            );
            let anchor = base_anchor_of(&font);
            assert_eq!(anchor.format(), 1, "at {:?}", location);
            assert_eq!(anchor.xCoordinate, caret + 100);
            assert_eq!(anchor.yCoordinate, 450);
            let kern_record = kern_record_of(&font);
            assert_eq!(kern_record.xAdvance, Some(kern), "at {:?}", location);
            assert!(!kern_record.has_device());
        }
    }

    #[test]
    fn test_gdef_dropped_when_emptied() {
        let axis_order = vec![tag!("wght"), tag!("wdth")];
        let mut font = Font::new();
        font.gdef = Some(GDEF {
            item_variation_store: Some(test_store()),
            ..Default::default()
        });
        instantiate_otl(
            &mut font,
            &axis_order,
            &limits(&[(tag!("wght"), 0.0), (tag!("wdth"), 0.0)]),
        );
        assert!(font.gdef.is_none());
    }

    #[test]
    fn test_hinting_device_untouched() {
        use crate::layout::device::Device;
        let axis_order = vec![tag!("wght"), tag!("wdth")];
        let mut font = test_font();
        let device = DeviceOrVariationIndex::Device(Device {
            startSize: 11,
            endSize: 15,
            deltaValues: vec![-1, -1, 1, 1, 1],
        });
        if let Positioning::Pair(pair) = &mut font.gpos.as_mut().unwrap().lookups[1].rule {
            pair.pairs[0].value_record_1.xAdvDevice = Some(device.clone());
        }
        instantiate_otl(
            &mut font,
            &axis_order,
            &limits(&[(tag!("wght"), 1.0), (tag!("wdth"), 1.0)]),
        );
        let kern_record = kern_record_of(&font);
        // No variation index, so the value is untouched and the device stays
        assert_eq!(kern_record.xAdvance, Some(-110));
        assert_eq!(kern_record.xAdvDevice, Some(device));
    }
}
