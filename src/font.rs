//! The in-memory font container the instancer operates on.

use crate::tables::avar::avar;
use crate::tables::cvar::cvar;
use crate::tables::cvt::cvt;
use crate::tables::fvar::fvar;
use crate::tables::gdef::GDEF;
use crate::tables::glyf::glyf;
use crate::tables::gpos::GPOS;
use crate::tables::gsub::GSUB;
use crate::tables::gvar::gvar;
use crate::tables::hhea::hhea;
use crate::tables::hmtx::hmtx;
use crate::tables::hvar::{HVAR, VVAR};
use crate::tables::mvar::MVAR;
use crate::tables::name::name;
use crate::tables::os2::os2;
use crate::tables::post::post;
use crate::tables::stat::STAT;
use crate::tables::vmtx::vmtx;
use serde::{Deserialize, Serialize};

/// A font, as the set of decoded tables the instancer reads and rewrites.
///
/// Each slot is optional; "removing" a table sets its slot to `None`.
/// Tables this crate never touches stay with the font I/O layer and are
/// not represented here. The caller owns the font for the duration of an
/// instancing call; all passes mutate it in place.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    /// The `fvar` table (axes and named instances)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fvar: Option<fvar>,
    /// The `avar` table (axis-variation segment maps)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avar: Option<avar>,
    /// The `glyf` table (outlines)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyf: Option<glyf>,
    /// The `gvar` table (outline variations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gvar: Option<gvar>,
    /// The `cvt ` table (control values)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvt: Option<cvt>,
    /// The `cvar` table (control value variations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvar: Option<cvar>,
    /// The `hmtx` table (horizontal metrics)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hmtx: Option<hmtx>,
    /// The `vmtx` table (vertical metrics)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vmtx: Option<vmtx>,
    /// The `hhea` table (horizontal header)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hhea: Option<hhea>,
    /// The `OS/2` table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os2: Option<os2>,
    /// The `post` table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<post>,
    /// The `name` table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<name>,
    /// The `MVAR` table (font-wide metric variations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mvar: Option<MVAR>,
    /// The `HVAR` table (horizontal metric variations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hvar: Option<HVAR>,
    /// The `VVAR` table (vertical metric variations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vvar: Option<VVAR>,
    /// The `GDEF` table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gdef: Option<GDEF>,
    /// The `GPOS` table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpos: Option<GPOS>,
    /// The `GSUB` table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gsub: Option<GSUB>,
    /// The `STAT` table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stat: Option<STAT>,
}

impl Font {
    /// A font with no tables.
    pub fn new() -> Font {
        Font::default()
    }

    /// True if the font still has a variable design space.
    pub fn is_variable(&self) -> bool {
        self.fvar.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_roundtrip() {
        let mut font = Font::new();
        font.cvt = Some(cvt(vec![500, -400, 180, 250]));
        let doc = serde_json::to_string(&font).unwrap();
        let back: Font = serde_json::from_str(&doc).unwrap();
        assert_eq!(font, back);
        assert!(!doc.contains("glyf"));
    }
}
