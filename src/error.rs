//! Errors raised while instancing a font.

use crate::types::Tag;
use thiserror::Error;

/// Everything that can abort an instancing call.
///
/// All of these surface to the caller before any table is mutated;
/// recoverable conditions (such as an unsupported feature-variation
/// condition format) are logged and worked around instead.
#[derive(Debug, Error)]
pub enum InstancerError {
    /// A limit string did not match the `AXIS=VALUE | AXIS=LO:HI | AXIS=drop` grammar.
    #[error("invalid location format: {0:?}")]
    ParseError(String),

    /// The same axis was given more than one limit.
    #[error("Specified multiple limits for the same axis: {0}")]
    DuplicateAxis(Tag),

    /// An axis tag in the requested location is not an axis of the font.
    #[error("Axis {0} not present in fvar")]
    UnknownAxis(Tag),

    /// A requested range does not contain the axis default.
    #[error("Unsupported range {axis}:={minimum}:{maximum}; default position is {default}")]
    OutOfRange {
        axis: Tag,
        minimum: f64,
        maximum: f64,
        default: f64,
    },

    /// A variation table is present without its required companion.
    #[error("{0}")]
    StructuralError(String),
}
