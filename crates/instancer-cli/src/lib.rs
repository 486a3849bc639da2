//! Support code for the `instancer` command line tool: axis-limit parsing
//! and font-document I/O.
//!
//! Font documents are the JSON serialization of the decoded tables in
//! [`fontinstancer::Font`]; the binary SFNT container is handled by a
//! separate font I/O layer.

use fontinstancer::instancer::{AxisRange, UserAxisLimit, UserAxisLimits};
use fontinstancer::types::{fixed_round, Tag};
use fontinstancer::{Font, InstancerError};
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Parse the command line's `AXIS=SPEC` arguments.
///
/// A spec is a decimal value (pin), `LO:HI` (limit), or the literal
/// string `drop` (pin at the axis default). Values are snapped to the
/// 16.16 fixed grid the binary format stores user coordinates in.
pub fn parse_limits(args: &[&str]) -> Result<UserAxisLimits, InstancerError> {
    let matcher = Regex::new(r"^(\w{1,4})=(?:(drop)|(?:([^:]+)(?:[:](.+))?))$").unwrap();
    let mut limits = BTreeMap::new();
    for limit_string in args {
        let captures = matcher
            .captures(limit_string)
            .ok_or_else(|| InstancerError::ParseError(limit_string.to_string()))?;
        let tag = Tag::from_raw(captures.get(1).unwrap().as_str())
            .map_err(|_| InstancerError::ParseError(limit_string.to_string()))?;
        let limit = if captures.get(2).is_some() {
            UserAxisLimit::Drop
        } else {
            let lower = parse_value(captures.get(3).unwrap().as_str(), limit_string)?;
            match captures.get(4) {
                Some(upper) => {
                    let upper = parse_value(upper.as_str(), limit_string)?;
                    if upper < lower {
                        return Err(InstancerError::ParseError(limit_string.to_string()));
                    }
                    if (upper - lower).abs() < f64::EPSILON {
                        UserAxisLimit::Pin(lower)
                    } else {
                        UserAxisLimit::Range(AxisRange::new(lower, upper))
                    }
                }
                None => UserAxisLimit::Pin(lower),
            }
        };
        if limits.insert(tag, limit).is_some() {
            return Err(InstancerError::DuplicateAxis(tag));
        }
    }
    Ok(UserAxisLimits(limits))
}

fn parse_value(value: &str, limit_string: &str) -> Result<f64, InstancerError> {
    value
        .parse::<f64>()
        .map(fixed_round)
        .map_err(|_| InstancerError::ParseError(limit_string.to_string()))
}

/// Read a font document.
pub fn open_font(path: &Path) -> Result<Font, Box<dyn Error>> {
    let document = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&document)?)
}

/// Write a font document.
pub fn save_font(font: &Font, path: &Path) -> Result<(), Box<dyn Error>> {
    fs::write(path, serde_json::to_string_pretty(font)?)?;
    Ok(())
}
