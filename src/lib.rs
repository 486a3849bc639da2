#![allow(non_camel_case_types, non_snake_case, clippy::upper_case_acronyms)]

//! Partial instancing for OpenType variable fonts.
//!
//! A variable font packs a whole design space of interpolatable outlines and
//! layout adjustments into one binary. This crate reduces that design space:
//! each axis named by the caller is either *pinned* to a single user-space
//! value (the axis disappears and its contribution is baked into the font's
//! defaults) or *limited* to a sub-range (the axis survives but its variation
//! data is clipped and renormalised).
//!
//! The crate operates on decoded, in-memory table representations (see
//! [`font::Font`]); compiling those tables to and from the binary SFNT
//! container is the job of a font I/O layer, not of this crate. The main
//! entry point is [`instancer::instantiate_variable_font`].

pub mod error;
pub mod font;
pub mod instancer;
pub mod layout;
pub mod otvar;
pub mod tables;
pub mod types;

pub use error::InstancerError;
pub use font::Font;
pub use instancer::{instantiate_variable_font, InstancerOptions};

/// Create a `BTreeMap` from a list of `key => value` pairs.
#[macro_export]
macro_rules! btreemap {
    ($($k:expr => $v:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut m = std::collections::BTreeMap::new();
        $( m.insert($k, $v); )*
        m
    }};
}
