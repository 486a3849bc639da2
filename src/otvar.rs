//! OpenType Variations common structures.
//!
//! The types here are the decoded, in-memory forms shared by the variation
//! tables: designspace locations and regions, per-point tuple variations
//! (`gvar`/`cvar`), and the item variation store used by the metric and
//! layout tables. The instancing algorithms operating on them live in
//! [`crate::instancer`].

mod adapter;
mod itemvariationstore;
/// Utilities for Interpolation of Unreferenced Points
pub mod iup;
mod locations;
mod tuplevariation;

pub use adapter::TupleVarStoreAdapter;
pub use itemvariationstore::{
    varidx, varidx_split, ItemVariationData, ItemVariationStore, RegionAxisCoordinates,
};
pub use locations::{normalize_value, support_scalar, Location, Support};
pub use tuplevariation::{support_key, Delta, TupleVariation};
