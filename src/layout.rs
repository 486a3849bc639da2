//! Shared building blocks for the OpenType layout tables (GSUB/GPOS/GDEF).

/// Anchor tables
pub mod anchor;
/// Feature lists and feature variations
pub mod common;
/// Device and variation index tables
pub mod device;
/// Single adjustment positioning (GPOS lookup type 1)
pub mod gpos1;
/// Pair adjustment positioning (GPOS lookup type 2)
pub mod gpos2;
/// Mark-to-base attachment positioning (GPOS lookup type 4)
pub mod gpos4;
/// Single substitution (GSUB lookup type 1)
pub mod gsub1;
/// Value records
pub mod valuerecord;
