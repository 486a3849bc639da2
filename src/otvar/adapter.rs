//! A view of an item variation store as per-block lists of tuple variations.
//!
//! The item store and the tuple representation describe the same logical
//! object; the tuple form is sparse and per-item, which is what the
//! instancing algorithms want to work on. This adapter converts in both
//! directions, keeping each block's item count on the side because a block
//! may contain items with no non-zero deltas and those must round-trip.

use crate::otvar::{
    support_key, Delta, ItemVariationData, ItemVariationStore, Support, TupleVariation,
};
use crate::types::{round_half_even, Tag};
use std::collections::BTreeSet;

/// An item variation store, exploded into one list of tuple variations per
/// variation data block.
#[derive(Debug, PartialEq, Clone)]
pub struct TupleVarStoreAdapter {
    /// The shared region pool, as sparse per-axis supports.
    pub regions: Vec<Support>,
    /// The font's axis tags, in fvar order.
    pub axis_order: Vec<Tag>,
    /// One list of tuple variations per variation data block. Each
    /// variation's delta vector has one entry per item in the block.
    pub tuple_var_data: Vec<Vec<TupleVariation>>,
    /// The item count of each block, tracked independently of the tuple
    /// data so that all-zero items survive a round trip.
    pub item_counts: Vec<usize>,
}

impl TupleVarStoreAdapter {
    /// Explode an item variation store into tuple variations.
    ///
    /// Each region referenced by a block becomes one tuple variation whose
    /// delta vector is the corresponding column of the block's item matrix.
    /// All-zero columns are skipped.
    pub fn from_item_var_store(store: &ItemVariationStore, axis_order: Vec<Tag>) -> Self {
        let regions: Vec<Support> = (0..store.variationRegions.len())
            .map(|ix| store.region_support(&axis_order, ix))
            .collect();
        let mut tuple_var_data = Vec::with_capacity(store.variationData.len());
        let mut item_counts = Vec::with_capacity(store.variationData.len());
        for vardata in &store.variationData {
            let item_count = vardata.item_count();
            let mut variations = vec![];
            for (column, &region_ix) in vardata.region_indexes.iter().enumerate() {
                let deltas: Vec<i32> = vardata
                    .delta_values
                    .iter()
                    .map(|row| row[column])
                    .collect();
                if deltas.iter().all(|&d| d == 0) {
                    continue;
                }
                variations.push(TupleVariation::new(
                    regions[region_ix as usize].clone(),
                    deltas
                        .iter()
                        .map(|&d| Some(Delta::Delta1D(d as f64)))
                        .collect(),
                ));
            }
            tuple_var_data.push(variations);
            item_counts.push(item_count);
        }
        TupleVarStoreAdapter {
            regions,
            axis_order,
            tuple_var_data,
            item_counts,
        }
    }

    /// Rebuild the shared region list from the regions the tuple variations
    /// actually reference. Pre-existing regions keep their order; regions
    /// introduced by clipping are appended in first-use order; duplicates
    /// are merged.
    pub fn rebuild_regions(&mut self) {
        let mut used: Vec<(Vec<(Tag, i32, i32, i32)>, Support)> = vec![];
        for var in self.tuple_var_data.iter().flatten() {
            let key = var.region_key();
            if !used.iter().any(|(k, _)| *k == key) {
                used.push((key, var.axes.clone()));
            }
        }
        let mut new_regions: Vec<Support> = vec![];
        for region in &self.regions {
            let key = support_key(region);
            if let Some(pos) = used.iter().position(|(k, _)| *k == key) {
                new_regions.push(region.clone());
                used.remove(pos);
            }
        }
        new_regions.extend(used.into_iter().map(|(_, region)| region));
        self.regions = new_regions;
    }

    /// Remove a set of axes from every region in bulk. Used once the axes'
    /// scalar contribution has been baked into the deltas. Regions that
    /// become identical are merged; regions left with no axes disappear.
    pub fn drop_axes(&mut self, axes: &BTreeSet<Tag>) {
        let mut new_regions: Vec<Support> = vec![];
        let mut seen: Vec<Vec<(Tag, i32, i32, i32)>> = vec![];
        for region in &self.regions {
            let mut pruned = region.clone();
            pruned.retain(|tag, _| !axes.contains(tag));
            if pruned.is_empty() {
                continue;
            }
            let key = support_key(&pruned);
            if !seen.contains(&key) {
                seen.push(key);
                new_regions.push(pruned);
            }
        }
        self.regions = new_regions;
        self.axis_order.retain(|tag| !axes.contains(tag));
        for var in self.tuple_var_data.iter_mut().flatten() {
            var.axes.retain(|tag, _| !axes.contains(tag));
        }
    }

    /// Collapse the tuple variations back into an item variation store.
    ///
    /// All distinct referenced regions get contiguous indices; each block's
    /// item matrix is rebuilt with one column per referenced region, zero
    /// for items a region has no delta for. Item counts are preserved.
    pub fn as_item_var_store(&self) -> ItemVariationStore {
        let region_keys: Vec<Vec<(Tag, i32, i32, i32)>> =
            self.regions.iter().map(support_key).collect();
        let mut variation_data = vec![];
        for (variations, &item_count) in self.tuple_var_data.iter().zip(self.item_counts.iter()) {
            let region_indexes: Vec<u16> = variations
                .iter()
                .map(|var| {
                    region_keys
                        .iter()
                        .position(|k| *k == var.region_key())
                        .expect("tuple variation references a region missing from the pool")
                        as u16
                })
                .collect();
            let delta_values: Vec<Vec<i32>> = (0..item_count)
                .map(|item| {
                    variations
                        .iter()
                        .map(|var| {
                            var.deltas[item]
                                .as_ref()
                                .map(|d| round_half_even(d.get_1d()))
                                .unwrap_or(0)
                        })
                        .collect()
                })
                .collect();
            variation_data.push(ItemVariationData {
                region_indexes,
                delta_values,
            });
        }
        ItemVariationStore {
            axisCount: self.axis_order.len() as u16,
            variationRegions: self
                .regions
                .iter()
                .map(|region| ItemVariationStore::region_from_support(region, &self.axis_order))
                .collect(),
            variationData: variation_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::btreemap;
    use crate::tag;
    use pretty_assertions::assert_eq;

    fn sample_regions() -> Vec<Support> {
        vec![
            btreemap!(tag!("wght") => (-1.0, -1.0, 0.0)),
            btreemap!(tag!("wght") => (0.0, 0.5, 1.0)),
            btreemap!(tag!("wght") => (0.5, 1.0, 1.0)),
            btreemap!(tag!("wdth") => (-1.0, -1.0, 0.0)),
            btreemap!(tag!("wght") => (-1.0, -1.0, 0.0), tag!("wdth") => (-1.0, -1.0, 0.0)),
            btreemap!(tag!("wght") => (0.0, 0.5, 1.0), tag!("wdth") => (-1.0, -1.0, 0.0)),
            btreemap!(tag!("wght") => (0.5, 1.0, 1.0), tag!("wdth") => (-1.0, -1.0, 0.0)),
        ]
    }

    fn sample_store() -> ItemVariationStore {
        let axis_order = vec![tag!("wght"), tag!("wdth")];
        ItemVariationStore {
            axisCount: 2,
            variationRegions: sample_regions()
                .iter()
                .map(|r| ItemVariationStore::region_from_support(r, &axis_order))
                .collect(),
            variationData: vec![
                ItemVariationData {
                    region_indexes: vec![0, 1, 2, 4, 5, 6],
                    delta_values: vec![
                        vec![10, -20, 30, -40, 50, -60],
                        vec![70, -80, 90, -100, 110, -120],
                    ],
                },
                ItemVariationData {
                    region_indexes: vec![3, 4, 5, 6],
                    delta_values: vec![vec![5, -15, 25, -35], vec![45, -55, 65, -75]],
                },
            ],
        }
    }

    #[test]
    fn test_roundtrip() {
        let axis_order = vec![tag!("wght"), tag!("wdth")];
        let store = sample_store();
        let adapter = TupleVarStoreAdapter::from_item_var_store(&store, axis_order.clone());

        let regions = sample_regions();
        assert_eq!(
            adapter.tuple_var_data[0]
                .iter()
                .map(|v| v.axes.clone())
                .collect::<Vec<_>>(),
            vec![
                regions[0].clone(),
                regions[1].clone(),
                regions[2].clone(),
                regions[4].clone(),
                regions[5].clone(),
                regions[6].clone(),
            ]
        );
        assert_eq!(
            adapter.tuple_var_data[1][0].deltas,
            vec![Some(Delta::Delta1D(5.0)), Some(Delta::Delta1D(45.0))]
        );
        assert_eq!(adapter.item_counts, vec![2, 2]);
        assert_eq!(adapter.regions, regions);
        assert_eq!(adapter.axis_order, axis_order);

        let store2 = adapter.as_item_var_store();
        assert_eq!(store2, store);
    }

    #[test]
    fn test_zero_columns_skipped() {
        let axis_order = vec![tag!("wght")];
        let store = ItemVariationStore {
            axisCount: 1,
            variationRegions: vec![
                ItemVariationStore::region_from_support(
                    &btreemap!(tag!("wght") => (-1.0, -1.0, 0.0)),
                    &axis_order,
                ),
                ItemVariationStore::region_from_support(
                    &btreemap!(tag!("wght") => (0.0, 1.0, 1.0)),
                    &axis_order,
                ),
            ],
            variationData: vec![ItemVariationData {
                region_indexes: vec![0, 1],
                delta_values: vec![vec![0, 3], vec![0, -2]],
            }],
        };
        let adapter = TupleVarStoreAdapter::from_item_var_store(&store, axis_order);
        assert_eq!(adapter.tuple_var_data[0].len(), 1);
        assert_eq!(
            adapter.tuple_var_data[0][0].axes,
            btreemap!(tag!("wght") => (0.0, 1.0, 1.0))
        );
    }

    #[test]
    fn test_drop_axes() {
        let mut regions = sample_regions();
        regions.insert(3, btreemap!(tag!("opsz") => (0.0, 1.0, 1.0)));
        let mut adapter = TupleVarStoreAdapter {
            regions,
            axis_order: vec![tag!("wght"), tag!("wdth"), tag!("opsz")],
            tuple_var_data: vec![],
            item_counts: vec![],
        };

        adapter.drop_axes(&[tag!("wdth")].into_iter().collect());

        assert_eq!(
            adapter.regions,
            vec![
                btreemap!(tag!("wght") => (-1.0, -1.0, 0.0)),
                btreemap!(tag!("wght") => (0.0, 0.5, 1.0)),
                btreemap!(tag!("wght") => (0.5, 1.0, 1.0)),
                btreemap!(tag!("opsz") => (0.0, 1.0, 1.0)),
            ]
        );
        assert_eq!(adapter.axis_order, vec![tag!("wght"), tag!("opsz")]);

        adapter.drop_axes(&[tag!("wght"), tag!("opsz")].into_iter().collect());
        assert_eq!(adapter.regions, vec![]);
        assert!(adapter.axis_order.is_empty());
    }
}
