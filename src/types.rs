//! OpenType scalar types and rounding rules.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub type uint16 = u16;
pub type int16 = i16;
pub type uint32 = u32;
/// A glyph identifier (an index into the font's glyph order)
pub type GlyphID = u16;
/// A point in the normalized designspace, one coordinate per axis in axis order
pub type Tuple = Vec<f64>;

/// An OpenType tag.
///
/// A tag is a 4-byte array where each byte is in the printable ascii range
/// (0x20..=0x7E). Shorter names are padded with trailing spaces.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag([u8; 4]);

impl Tag {
    /// Attempt to create a `Tag` from raw bytes.
    ///
    /// The argument may be a slice of bytes, a `&str`, or any other type that
    /// impls `AsRef<[u8]>`. The slice must contain between 1 and 4 bytes, each
    /// in the printable ascii range; fewer than four bytes are padded with
    /// spaces.
    pub fn from_raw(src: impl AsRef<[u8]>) -> Result<Self, InvalidTag> {
        let src = src.as_ref();
        if src.is_empty() || src.len() > 4 {
            return Err(InvalidTag::InvalidLength(src.len()));
        }
        if let Some(pos) = src.iter().position(|b| !(0x20..=0x7E).contains(b)) {
            return Err(InvalidTag::InvalidByte {
                pos,
                byte: src[pos],
            });
        }
        let mut out = [b' '; 4];
        out[..src.len()].copy_from_slice(src);
        Ok(Tag(out))
    }

    /// Create a tag from a string in const context. Used by the `tag!` macro;
    /// panics at compile time on malformed input.
    pub const fn from_str_const(src: &str) -> Self {
        let bytes = src.as_bytes();
        assert!(!bytes.is_empty() && bytes.len() <= 4, "tags are 1-4 bytes");
        let mut out = [b' '; 4];
        let mut i = 0;
        while i < bytes.len() {
            assert!(
                bytes[i] >= 0x20 && bytes[i] <= 0x7E,
                "tag bytes must be printable ascii"
            );
            out[i] = bytes[i];
            i += 1;
        }
        Tag(out)
    }

    /// This tag as raw bytes.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// This tag as a `&str`.
    pub fn as_str(&self) -> &str {
        // Constructors only accept printable ascii
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

/// An error representing an invalid tag.
#[derive(Clone, Debug)]
pub enum InvalidTag {
    InvalidLength(usize),
    InvalidByte { pos: usize, byte: u8 },
}

impl fmt::Display for InvalidTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvalidTag::InvalidLength(len) => write!(f, "invalid tag length {}", len),
            InvalidTag::InvalidByte { pos, byte } => {
                write!(f, "invalid byte 0x{:02x} at index {}", byte, pos)
            }
        }
    }
}

impl std::error::Error for InvalidTag {}

impl FromStr for Tag {
    type Err = InvalidTag;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Tag::from_raw(src)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({:?})", self.as_str())
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Tag::from_raw(&s).map_err(|e| D::Error::custom(format!("bad tag {:?}: {}", s, e)))
    }
}

/// Create a `Tag` from a string literal at compile time.
#[macro_export]
macro_rules! tag {
    ($s:literal) => {
        $crate::types::Tag::from_str_const($s)
    };
}

/// Round a value to a 32-bit integer using OpenType rounding.
///
/// The OpenType spec, in the section on normalization of font variations,
/// requires that fractional values of 0.5 and higher take the next higher
/// integer and that other fractional values truncate.
pub fn ot_round(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Round a value to the nearest integer, ties to even.
///
/// This is the rounding discipline applied whenever an accumulated
/// floating-point delta is written into an integer-typed field.
pub fn round_half_even(value: f64) -> i32 {
    value.round_ties_even() as i32
}

/// Snap a normalized coordinate to the F2DOT14 grid used on disk.
pub fn f2dot14_round(value: f64) -> f64 {
    ot_round(value * 16384.0) as f64 / 16384.0
}

/// Pack a normalized coordinate as its on-disk F2DOT14 bit pattern.
///
/// Used to compare normalized coordinates the way two fonts would compare
/// after a compile/decompile round trip.
pub fn f2dot14_bits(value: f64) -> i32 {
    ot_round(value * 16384.0)
}

/// Snap a user-space coordinate to the 16.16 fixed grid.
pub fn fixed_round(value: f64) -> f64 {
    ot_round(value * 65536.0) as f64 / 65536.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag() {
        assert_eq!(tag!("wght").as_str(), "wght");
        assert_eq!(tag!("cvt ").as_bytes(), b"cvt ");
        assert_eq!(Tag::from_raw("DSIG").unwrap(), tag!("DSIG"));
        assert_eq!(Tag::from_raw("ab").unwrap().as_str(), "ab  ");
        assert!(Tag::from_raw("tooloong").is_err());
        assert!(Tag::from_raw("").is_err());
    }

    #[test]
    fn test_rounding() {
        assert_eq!(ot_round(0.5), 1);
        assert_eq!(ot_round(-0.5), 0);
        assert_eq!(ot_round(1.4), 1);
        assert_eq!(round_half_even(0.5), 0);
        assert_eq!(round_half_even(1.5), 2);
        assert_eq!(round_half_even(-12.5), -12);
        assert_eq!(round_half_even(7.5), 8);
        assert!((f2dot14_round(0.6099854) - 0.6099854).abs() < 1e-4);
        assert_eq!(f2dot14_round(1.0), 1.0);
    }
}
