use std::collections::HashMap;

use serde::Deserialize;

use crate::AssetError;

/// A parsed three.js typeface font description.
///
/// Only the fields the glyph builder needs are kept; the JSON carries more
/// (kerning, underline metrics) that is ignored during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct Typeface {
    #[serde(rename = "familyName", default)]
    pub family_name: String,
    /// Font units per em; outline coordinates are divided by this.
    pub resolution: f32,
    pub glyphs: HashMap<String, Glyph>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Glyph {
    /// Horizontal advance in font units.
    #[serde(default)]
    pub ha: f32,
    /// Outline command string: `m`/`l`/`q`/`b` followed by coordinates.
    #[serde(default)]
    pub o: String,
}

impl Typeface {
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        let font: Typeface = serde_json::from_str(json)?;
        if font.resolution <= 0.0 {
            return Err(AssetError::Parse(format!(
                "non-positive resolution {}",
                font.resolution
            )));
        }
        Ok(font)
    }

    pub fn glyph(&self, ch: char) -> Result<&Glyph, AssetError> {
        self.glyphs
            .get(&ch.to_string())
            .ok_or(AssetError::MissingGlyph(ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "familyName": "Sample Sans",
        "resolution": 1000,
        "boundingBox": {"yMin": -100, "xMin": 0, "yMax": 900, "xMax": 800},
        "glyphs": {
            "N": {"ha": 720, "x_min": 50, "x_max": 670,
                  "o": "m 50 0 l 50 700 l 150 700 l 570 120 l 570 700 l 670 700 l 670 0 l 570 0 l 150 580 l 150 0 z"},
            "7": {"ha": 560, "o": "m 40 700 l 520 700 l 220 0 l 110 0 l 390 610 l 40 610 z"}
        }
    }"#;

    #[test]
    fn parses_the_fields_it_needs() {
        let font = Typeface::from_json(SAMPLE).unwrap();
        assert_eq!(font.family_name, "Sample Sans");
        assert_eq!(font.resolution, 1000.0);
        assert_eq!(font.glyph('N').unwrap().ha, 720.0);
        assert!(font.glyph('7').unwrap().o.starts_with("m 40 700"));
    }

    #[test]
    fn missing_glyph_is_a_typed_error() {
        let font = Typeface::from_json(SAMPLE).unwrap();
        let err = font.glyph('Q').unwrap_err();
        assert!(matches!(err, AssetError::MissingGlyph('Q')));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn garbage_json_is_a_parse_error() {
        let err = Typeface::from_json("{not json").unwrap_err();
        assert!(matches!(err, AssetError::Parse(_)));
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let err = Typeface::from_json(r#"{"resolution": 0, "glyphs": {}}"#).unwrap_err();
        assert!(matches!(err, AssetError::Parse(_)));
    }
}
