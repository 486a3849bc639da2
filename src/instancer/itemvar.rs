//! Instancing of item variation stores and the metric tables built on them.
//!
//! The store is converted to its tuple representation, put through the
//! shared tuple-variation algorithm, and converted back. The scalar mass
//! removed by pinning comes out as a per-item "default delta" for the
//! caller to fold into its static values, together with a mapping from old
//! to new 32-bit variation indices for the rows that still vary.

use crate::font::Font;
use crate::instancer::tuplevar::instantiate_tuple_variation_store;
use crate::instancer::NormalizedAxisLimits;
use crate::otvar::{varidx, ItemVariationStore, TupleVarStoreAdapter};
use crate::types::{round_half_even, Tag};
use std::collections::{BTreeMap, BTreeSet};

/// The delta-set index map entry for "no variation data".
pub const NO_VARIATION_INDEX: u32 = 0xFFFF_FFFF;

impl TupleVarStoreAdapter {
    /// Instantiate every block's tuple variations, returning the default
    /// deltas per block and row (unrounded). Pinned axes disappear from
    /// the axis order and the region list is rebuilt from the surviving
    /// tuples.
    pub fn instantiate(&mut self, axis_limits: &NormalizedAxisLimits) -> Vec<Vec<f64>> {
        let mut default_delta_array = vec![];
        for (variations, &item_count) in self.tuple_var_data.iter_mut().zip(self.item_counts.iter())
        {
            let defaults = instantiate_tuple_variation_store(variations, axis_limits);
            let row: Vec<f64> = if defaults.is_empty() {
                vec![0.0; item_count]
            } else {
                defaults
                    .iter()
                    .map(|delta| delta.as_ref().map(|d| d.get_1d()).unwrap_or(0.0))
                    .collect()
            };
            default_delta_array.push(row);
        }
        self.rebuild_regions();
        let pinned: BTreeSet<Tag> = axis_limits.pinned().keys().copied().collect();
        self.axis_order.retain(|tag| !pinned.contains(tag));
        default_delta_array
    }
}

/// Instantiate an item variation store in place.
///
/// Returns the default deltas (rounded, ties to even) for every original
/// variation index, and the mapping from old variation index to new for
/// the rows whose block survived. Rows absent from the mapping no longer
/// vary; their whole residual value is in the default delta.
pub fn instantiate_item_variation_store(
    store: &mut ItemVariationStore,
    axis_order: &[Tag],
    axis_limits: &NormalizedAxisLimits,
) -> (BTreeMap<u32, i32>, BTreeMap<u32, u32>) {
    let mut adapter = TupleVarStoreAdapter::from_item_var_store(store, axis_order.to_vec());
    let default_delta_array = adapter.instantiate(axis_limits);
    let mut new_store = adapter.as_item_var_store();

    // Blocks whose items all stopped varying disappear; surviving blocks
    // are renumbered contiguously.
    let mut remap = BTreeMap::new();
    let mut kept = vec![];
    for (major, block) in new_store.variationData.into_iter().enumerate() {
        let all_zero = block.region_indexes.is_empty()
            || block
                .delta_values
                .iter()
                .all(|row| row.iter().all(|&delta| delta == 0));
        if all_zero {
            continue;
        }
        let new_major = kept.len() as u16;
        for row in 0..block.item_count() {
            remap.insert(
                varidx(major as u16, row as u16),
                varidx(new_major, row as u16),
            );
        }
        kept.push(block);
    }
    new_store.variationData = kept;
    if new_store.variationData.is_empty() {
        new_store.variationRegions.clear();
    }
    *store = new_store;

    let mut default_deltas = BTreeMap::new();
    for (major, rows) in default_delta_array.iter().enumerate() {
        for (minor, &delta) in rows.iter().enumerate() {
            default_deltas.insert(varidx(major as u16, minor as u16), round_half_even(delta));
        }
    }
    (default_deltas, remap)
}

fn add_i16(value: &mut i16, delta: i32) {
    *value = (*value as i32 + delta) as i16;
}

fn add_u16(value: &mut u16, delta: i32) {
    *value = (*value as i32 + delta).max(0) as u16;
}

/// Fold a default delta into the font-wide value a metric tag addresses.
/// Tags for tables this font does not carry are skipped with a warning.
fn set_mvar_delta(font: &mut Font, tag: Tag, delta: i32) {
    if delta == 0 {
        return;
    }
    match tag.as_str() {
        "hcrs" => font.hhea.as_mut().map(|t| add_i16(&mut t.caretSlopeRise, delta)),
        "hcrn" => font.hhea.as_mut().map(|t| add_i16(&mut t.caretSlopeRun, delta)),
        "hcof" => font.hhea.as_mut().map(|t| add_i16(&mut t.caretOffset, delta)),
        "hasc" => font.os2.as_mut().map(|t| add_i16(&mut t.sTypoAscender, delta)),
        "hdsc" => font.os2.as_mut().map(|t| add_i16(&mut t.sTypoDescender, delta)),
        "hlgp" => font.os2.as_mut().map(|t| add_i16(&mut t.sTypoLineGap, delta)),
        "hcla" => font.os2.as_mut().map(|t| add_u16(&mut t.usWinAscent, delta)),
        "hcld" => font.os2.as_mut().map(|t| add_u16(&mut t.usWinDescent, delta)),
        "sbxs" => font.os2.as_mut().map(|t| add_i16(&mut t.ySubscriptXSize, delta)),
        "sbys" => font.os2.as_mut().map(|t| add_i16(&mut t.ySubscriptYSize, delta)),
        "sbxo" => font.os2.as_mut().map(|t| add_i16(&mut t.ySubscriptXOffset, delta)),
        "sbyo" => font.os2.as_mut().map(|t| add_i16(&mut t.ySubscriptYOffset, delta)),
        "spxs" => font.os2.as_mut().map(|t| add_i16(&mut t.ySuperscriptXSize, delta)),
        "spys" => font.os2.as_mut().map(|t| add_i16(&mut t.ySuperscriptYSize, delta)),
        "spxo" => font.os2.as_mut().map(|t| add_i16(&mut t.ySuperscriptXOffset, delta)),
        "spyo" => font.os2.as_mut().map(|t| add_i16(&mut t.ySuperscriptYOffset, delta)),
        "strs" => font.os2.as_mut().map(|t| add_i16(&mut t.yStrikeoutSize, delta)),
        "stro" => font.os2.as_mut().map(|t| add_i16(&mut t.yStrikeoutPosition, delta)),
        "xhgt" => font.os2.as_mut().map(|t| add_i16(&mut t.sxHeight, delta)),
        "cpht" => font.os2.as_mut().map(|t| add_i16(&mut t.sCapHeight, delta)),
        "undo" => font.post.as_mut().map(|t| add_i16(&mut t.underlinePosition, delta)),
        "unds" => font.post.as_mut().map(|t| add_i16(&mut t.underlineThickness, delta)),
        other => {
            log::warn!("Don't know how to apply MVAR deltas for {:?}", other);
            None
        }
    };
}

/// Instantiate the `MVAR` table, folding default deltas into the metric
/// values it addresses.
pub(crate) fn instantiate_mvar(
    font: &mut Font,
    axis_order: &[Tag],
    axis_limits: &NormalizedAxisLimits,
) {
    log::info!("Instantiating MVAR table");
    let mut mvar = font.mvar.take().unwrap();
    let (default_deltas, remap) =
        instantiate_item_variation_store(&mut mvar.itemVariationStore, axis_order, axis_limits);
    for record in &mvar.valueRecords {
        if let Some(&delta) = default_deltas.get(&record.varIdx) {
            set_mvar_delta(font, record.valueTag, delta);
        }
    }
    if mvar.itemVariationStore.is_empty() {
        log::info!("Dropping MVAR table");
        return;
    }
    mvar.valueRecords.retain_mut(|record| match remap.get(&record.varIdx) {
        Some(&new_idx) => {
            record.varIdx = new_idx;
            true
        }
        None => false,
    });
    font.mvar = Some(mvar);
}

fn remap_index_mapping(mapping: &mut Vec<u32>, remap: &BTreeMap<u32, u32>) {
    for index in mapping.iter_mut() {
        *index = remap.get(index).copied().unwrap_or(NO_VARIATION_INDEX);
    }
}

/// Instantiate the `HVAR` table. Default deltas are not folded into
/// `hmtx`: for outline fonts the phantom-point pass regenerates the
/// metrics already.
pub(crate) fn instantiate_hvar(
    font: &mut Font,
    axis_order: &[Tag],
    axis_limits: &NormalizedAxisLimits,
) {
    log::info!("Instantiating HVAR table");
    let hvar = font.hvar.as_mut().unwrap();
    let (_, remap) =
        instantiate_item_variation_store(&mut hvar.itemVariationStore, axis_order, axis_limits);
    if hvar.itemVariationStore.is_empty() {
        log::info!("Dropping HVAR table");
        font.hvar = None;
        return;
    }
    if hvar.advanceWidthMapping.is_none() && !remap.is_empty() {
        // Implicit glyph-id indexing is only sound while block 0 keeps its
        // rows in place; materialize a map when that stops being true.
        let identity = remap.iter().all(|(old, new)| old == new);
        if !identity {
            if let Some(hmtx) = font.hmtx.as_ref() {
                hvar.advanceWidthMapping = Some(
                    (0..hmtx.metrics.len() as u32)
                        .map(|gid| remap.get(&gid).copied().unwrap_or(NO_VARIATION_INDEX))
                        .collect(),
                );
            }
        }
    }
    for mapping in [
        hvar.advanceWidthMapping.as_mut(),
        hvar.lsbMapping.as_mut(),
        hvar.rsbMapping.as_mut(),
    ]
    .into_iter()
    .flatten()
    {
        remap_index_mapping(mapping, &remap);
    }
}

/// Instantiate the `VVAR` table; same shape as `HVAR`.
pub(crate) fn instantiate_vvar(
    font: &mut Font,
    axis_order: &[Tag],
    axis_limits: &NormalizedAxisLimits,
) {
    log::info!("Instantiating VVAR table");
    let vvar = font.vvar.as_mut().unwrap();
    let (_, remap) =
        instantiate_item_variation_store(&mut vvar.itemVariationStore, axis_order, axis_limits);
    if vvar.itemVariationStore.is_empty() {
        log::info!("Dropping VVAR table");
        font.vvar = None;
        return;
    }
    for mapping in [
        vvar.advanceHeightMapping.as_mut(),
        vvar.tsbMapping.as_mut(),
        vvar.bsbMapping.as_mut(),
        vvar.vOrgMapping.as_mut(),
    ]
    .into_iter()
    .flatten()
    {
        remap_index_mapping(mapping, &remap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::btreemap;
    use crate::instancer::NormalizedAxisLimit;
    use crate::otvar::{Delta, ItemVariationData, Support, TupleVariation};
    use crate::tables::mvar::{MvarValueRecord, MVAR};
    use crate::tables::os2::os2;
    use crate::tables::post::post;
    use crate::tag;
    use pretty_assertions::assert_eq;

    fn limits(location: &[(Tag, f64)]) -> NormalizedAxisLimits {
        NormalizedAxisLimits(
            location
                .iter()
                .map(|&(tag, v)| (tag, NormalizedAxisLimit::Pin(v)))
                .collect(),
        )
    }

    fn build_store(regions: Vec<Support>, data: Vec<(Vec<u16>, Vec<Vec<i32>>)>) -> ItemVariationStore {
        let axis_order = vec![tag!("wght"), tag!("wdth")];
        ItemVariationStore {
            axisCount: 2,
            variationRegions: regions
                .iter()
                .map(|region| ItemVariationStore::region_from_support(region, &axis_order))
                .collect(),
            variationData: data
                .into_iter()
                .map(|(region_indexes, delta_values)| ItemVariationData {
                    region_indexes,
                    delta_values,
                })
                .collect(),
        }
    }

    fn sample_store() -> ItemVariationStore {
        build_store(
            vec![
                btreemap!(tag!("wght") => (-1.0, -1.0, 0.0)),
                btreemap!(tag!("wght") => (0.0, 0.5, 1.0)),
                btreemap!(tag!("wght") => (0.5, 1.0, 1.0)),
                btreemap!(tag!("wdth") => (-1.0, -1.0, 0.0)),
                btreemap!(tag!("wght") => (-1.0, -1.0, 0.0), tag!("wdth") => (-1.0, -1.0, 0.0)),
                btreemap!(tag!("wght") => (0.0, 0.5, 1.0), tag!("wdth") => (-1.0, -1.0, 0.0)),
                btreemap!(tag!("wght") => (0.5, 1.0, 1.0), tag!("wdth") => (-1.0, -1.0, 0.0)),
            ],
            vec![
                (
                    vec![0, 1, 2],
                    vec![vec![100, 100, 100], vec![100, 100, 100]],
                ),
                (
                    vec![3, 4, 5, 6],
                    vec![vec![100, 100, 100, 100], vec![100, 100, 100, 100]],
                ),
            ],
        )
    }

    #[test]
    fn test_instantiate_default_deltas() {
        let axis_order = vec![tag!("wght"), tag!("wdth")];
        for (location, expected_deltas, num_regions) in [
            (vec![(tag!("wght"), 0.0)], vec![vec![0, 0], vec![0, 0]], 1),
            (vec![(tag!("wght"), 0.25)], vec![vec![50, 50], vec![0, 0]], 1),
            (vec![(tag!("wdth"), 0.0)], vec![vec![0, 0], vec![0, 0]], 3),
            (
                vec![(tag!("wdth"), -0.75)],
                vec![vec![0, 0], vec![75, 75]],
                3,
            ),
            (
                vec![(tag!("wght"), 0.0), (tag!("wdth"), 0.0)],
                vec![vec![0, 0], vec![0, 0]],
                0,
            ),
            (
                vec![(tag!("wght"), 0.25), (tag!("wdth"), 0.0)],
                vec![vec![50, 50], vec![0, 0]],
                0,
            ),
            (
                vec![(tag!("wght"), 0.0), (tag!("wdth"), -0.75)],
                vec![vec![0, 0], vec![75, 75]],
                0,
            ),
        ] {
            let mut store = sample_store();
            let (default_deltas, _) =
                instantiate_item_variation_store(&mut store, &axis_order, &limits(&location));
            let mut default_array: Vec<Vec<i32>> = vec![];
            for (&idx, &delta) in default_deltas.iter() {
                let (major, minor) = crate::otvar::varidx_split(idx);
                if major as usize == default_array.len() {
                    default_array.push(vec![]);
                }
                assert_eq!(default_array[major as usize].len(), minor as usize);
                default_array[major as usize].push(delta);
            }
            assert_eq!(default_array, expected_deltas, "at {:?}", location);
            assert_eq!(store.variationRegions.len(), num_regions, "at {:?}", location);
        }
    }

    #[test]
    fn test_adapter_instantiate() {
        let regions = vec![
            btreemap!(tag!("wght") => (-1.0, -1.0, 0.0)),
            btreemap!(tag!("wght") => (0.0, 1.0, 1.0)),
            btreemap!(tag!("wdth") => (-1.0, -1.0, 0.0)),
            btreemap!(tag!("wght") => (-1.0, -1.0, 0.0), tag!("wdth") => (-1.0, -1.0, 0.0)),
            btreemap!(tag!("wght") => (0.0, 1.0, 1.0), tag!("wdth") => (-1.0, -1.0, 0.0)),
        ];
        let d = |values: &[f64]| -> Vec<Option<Delta>> {
            values.iter().map(|&v| Some(Delta::Delta1D(v))).collect()
        };
        let mut adapter = TupleVarStoreAdapter {
            regions: regions.clone(),
            axis_order: vec![tag!("wght"), tag!("wdth")],
            tuple_var_data: vec![
                vec![
                    TupleVariation::new(regions[0].clone(), d(&[10.0, 70.0])),
                    TupleVariation::new(regions[1].clone(), d(&[30.0, 90.0])),
                    TupleVariation::new(regions[3].clone(), d(&[-40.0, -100.0])),
                    TupleVariation::new(regions[4].clone(), d(&[-60.0, -120.0])),
                ],
                vec![
                    TupleVariation::new(regions[2].clone(), d(&[5.0, 45.0])),
                    TupleVariation::new(regions[3].clone(), d(&[-15.0, -55.0])),
                    TupleVariation::new(regions[4].clone(), d(&[-35.0, -75.0])),
                ],
            ],
            item_counts: vec![2, 2],
        };

        let defaults = adapter.instantiate(&limits(&[(tag!("wght"), 0.5)]));

        assert_eq!(defaults, vec![vec![15.0, 45.0], vec![0.0, 0.0]]);
        assert_eq!(
            adapter.regions,
            vec![btreemap!(tag!("wdth") => (-1.0, -1.0, 0.0))]
        );
        assert_eq!(
            adapter.tuple_var_data,
            vec![
                vec![TupleVariation::new(
                    btreemap!(tag!("wdth") => (-1.0, -1.0, 0.0)),
                    d(&[-30.0, -60.0])
                )],
                vec![TupleVariation::new(
                    btreemap!(tag!("wdth") => (-1.0, -1.0, 0.0)),
                    d(&[-12.0, 8.0])
                )],
            ]
        );
        assert_eq!(adapter.axis_order, vec![tag!("wdth")]);
    }

    fn mvar_font() -> Font {
        let mut font = Font::new();
        font.os2 = Some(os2 {
            yStrikeoutSize: 50,
            sxHeight: 500,
            ..Default::default()
        });
        font.post = Some(post {
            underlinePosition: -100,
            underlineThickness: 50,
        });
        font.mvar = Some(MVAR {
            valueRecords: vec![
                MvarValueRecord {
                    valueTag: tag!("strs"),
                    varIdx: 0x0000_0000,
                },
                MvarValueRecord {
                    valueTag: tag!("undo"),
                    varIdx: 0x0000_0001,
                },
                MvarValueRecord {
                    valueTag: tag!("unds"),
                    varIdx: 0x0000_0002,
                },
                MvarValueRecord {
                    valueTag: tag!("xhgt"),
                    varIdx: 0x0001_0000,
                },
            ],
            itemVariationStore: build_store(
                vec![
                    btreemap!(tag!("wght") => (0.0, 1.0, 1.0)),
                    btreemap!(tag!("wdth") => (-1.0, -1.0, 0.0)),
                    btreemap!(tag!("wght") => (0.0, 1.0, 1.0), tag!("wdth") => (-1.0, -1.0, 0.0)),
                ],
                vec![
                    (
                        vec![0, 1, 2],
                        vec![vec![50, -30, -20], vec![-100, 0, 20], vec![100, 0, -20]],
                    ),
                    (vec![0], vec![vec![30]]),
                ],
            ),
        });
        font
    }

    fn mvar_values(font: &Font) -> (i16, i16, i16, i16) {
        (
            font.os2.as_ref().unwrap().yStrikeoutSize,
            font.post.as_ref().unwrap().underlinePosition,
            font.post.as_ref().unwrap().underlineThickness,
            font.os2.as_ref().unwrap().sxHeight,
        )
    }

    #[test]
    fn test_mvar_pin_and_drop_axis() {
        let axis_order = vec![tag!("wght"), tag!("wdth")];
        for (location, expected) in [
            (vec![(tag!("wght"), 1.0)], (100, -200, 150, 530)),
            (vec![(tag!("wght"), 0.5)], (75, -150, 100, 515)),
            (vec![(tag!("wght"), 0.0)], (50, -100, 50, 500)),
            (vec![(tag!("wdth"), -1.0)], (20, -100, 50, 500)),
            (vec![(tag!("wdth"), -0.5)], (35, -100, 50, 500)),
            (vec![(tag!("wdth"), 0.0)], (50, -100, 50, 500)),
        ] {
            let mut font = mvar_font();
            instantiate_mvar(&mut font, &axis_order, &limits(&location));
            assert_eq!(mvar_values(&font), expected, "at {:?}", location);
            // Residual variation survives on the other axis
            let mvar = font.mvar.as_ref().unwrap();
            assert!(mvar.itemVariationStore.variationRegions.len() < 3);
        }
    }

    #[test]
    fn test_mvar_full_instance() {
        let axis_order = vec![tag!("wght"), tag!("wdth")];
        for (location, expected) in [
            (
                vec![(tag!("wght"), 1.0), (tag!("wdth"), 0.0)],
                (100, -200, 150, 530),
            ),
            (
                vec![(tag!("wght"), 0.0), (tag!("wdth"), -1.0)],
                (20, -100, 50, 500),
            ),
            (
                vec![(tag!("wght"), 0.5), (tag!("wdth"), -0.5)],
                (55, -145, 95, 515),
            ),
            (
                vec![(tag!("wght"), 1.0), (tag!("wdth"), -1.0)],
                (50, -180, 130, 530),
            ),
        ] {
            let mut font = mvar_font();
            instantiate_mvar(&mut font, &axis_order, &limits(&location));
            assert_eq!(mvar_values(&font), expected, "at {:?}", location);
            assert!(font.mvar.is_none());
        }
    }

    #[test]
    fn test_mvar_record_remap() {
        // Pinning wght empties the second block (xhgt only varied along
        // wght); its record is dropped and the survivors are renumbered.
        let axis_order = vec![tag!("wght"), tag!("wdth")];
        let mut font = mvar_font();
        instantiate_mvar(&mut font, &axis_order, &limits(&[(tag!("wght"), 1.0)]));
        let mvar = font.mvar.as_ref().unwrap();
        assert_eq!(mvar.itemVariationStore.variationData.len(), 1);
        assert_eq!(
            mvar.valueRecords
                .iter()
                .map(|record| (record.valueTag, record.varIdx))
                .collect::<Vec<_>>(),
            vec![
                (tag!("strs"), 0x0000_0000),
                (tag!("undo"), 0x0000_0001),
                (tag!("unds"), 0x0000_0002),
            ]
        );
    }

    #[test]
    fn test_hvar_partial_and_full() {
        use crate::tables::hvar::HVAR;
        let axis_order = vec![tag!("wght"), tag!("wdth")];
        let mut font = Font::new();
        font.hvar = Some(HVAR {
            itemVariationStore: build_store(
                vec![
                    btreemap!(tag!("wght") => (0.0, 1.0, 1.0)),
                    btreemap!(tag!("wdth") => (-1.0, -1.0, 0.0)),
                ],
                vec![
                    (vec![0], vec![vec![0], vec![7]]),
                    (vec![1], vec![vec![0], vec![-48]]),
                ],
            ),
            advanceWidthMapping: Some(vec![0x0000_0000, 0x0001_0001]),
            lsbMapping: None,
            rsbMapping: None,
        });
        let mut partial = font.clone();
        instantiate_hvar(&mut partial, &axis_order, &limits(&[(tag!("wght"), 1.0)]));
        let hvar = partial.hvar.as_ref().unwrap();
        // Block 0 lost its only region; block 1 takes its place
        assert_eq!(hvar.itemVariationStore.variationData.len(), 1);
        assert_eq!(
            hvar.advanceWidthMapping,
            Some(vec![NO_VARIATION_INDEX, 0x0000_0001])
        );

        instantiate_hvar(
            &mut font,
            &axis_order,
            &limits(&[(tag!("wght"), 0.0), (tag!("wdth"), 0.0)]),
        );
        assert!(font.hvar.is_none());
    }
}
