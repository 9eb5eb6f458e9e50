//! The font subsetting capability used by the pipeline.

use fonttrim_font_subsetter::{Subsetter, uncovered_characters};
use fonttrim_font_woff2::{FontFormat, encode, to_sfnt};
use log::debug;

use crate::{CharacterSet, Error, Result};

/// Produces a font containing only the glyphs needed for a set of characters.
pub trait FontSubsetter {
    /// Subsets `font` (SFNT, WOFF or WOFF2) to `characters`, encoded as `format`.
    fn subset(&self, font: &[u8], characters: &CharacterSet, format: FontFormat) -> Result<Vec<u8>>;

    /// Characters of `characters` that `font` has no glyph for.
    fn missing_characters(&self, _font: &[u8], _characters: &CharacterSet) -> Result<Vec<char>> {
        Ok(Vec::new())
    }
}

/// HarfBuzz-backed subsetter with common layout features retained.
#[derive(Debug, Clone, Default)]
pub struct HarfBuzzSubsetter {
    retain_glyph_names: bool,
}

impl HarfBuzzSubsetter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn retain_glyph_names(mut self, retain: bool) -> Self {
        self.retain_glyph_names = retain;
        self
    }
}

impl FontSubsetter for HarfBuzzSubsetter {
    fn subset(&self, font: &[u8], characters: &CharacterSet, format: FontFormat) -> Result<Vec<u8>> {
        let sfnt = to_sfnt(font).map_err(Error::subset)?;
        debug!("Source font: {} bytes as {}", sfnt.len(), FontFormat::sniff(font).map_or("unknown", FontFormat::name));

        let subset = Subsetter::new()
            .with_characters(characters)
            .retain_glyph_names(self.retain_glyph_names)
            .subset(&sfnt)
            .map_err(Error::subset)?;
        debug!("Subset font: {} bytes before {format} encoding", subset.len());

        encode(&subset, format).map_err(Error::subset)
    }

    fn missing_characters(&self, font: &[u8], characters: &CharacterSet) -> Result<Vec<char>> {
        let sfnt = to_sfnt(font).map_err(Error::subset)?;
        uncovered_characters(&sfnt, characters).map_err(Error::subset)
    }
}
