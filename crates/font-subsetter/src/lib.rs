//! Character-set font subsetting wrapper around hb-subset with builder pattern.
//!
//! This crate retains the glyphs needed to render a given set of characters,
//! using HarfBuzz's hb-subset library. It operates purely on SFNT byte slices
//! with no file I/O; container conversion lives in `fonttrim-font-woff2`.
//!
//! # Example
//!
//! ```no_run
//! use fonttrim_font_subsetter::{Subsetter, subset_characters};
//!
//! let font_data: &[u8] = &[];
//! let subset = Subsetter::new()
//!     .with_characters("Hello".chars())
//!     .retain_glyph_names(true)
//!     .subset(font_data);
//!
//! let subset = subset_characters(font_data, "World".chars());
//! ```

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use hb_subset::{Blob, FontFace, SubsetInput, Tag};
use log::debug;
use read_fonts::{FontRef, TableProvider};

/// Layout features retained on top of HarfBuzz's defaults.
///
/// These cover ligatures, contextual alternates, kerning and mark
/// positioning, which web text commonly relies on.
pub const LAYOUT_FEATURES: &[&[u8; 4]] = &[
    b"ccmp", b"locl", b"rlig", b"liga", b"clig", b"calt", b"dlig", b"kern", b"mark", b"mkmk",
    b"rvrn", b"case", b"frac", b"numr", b"dnom", b"sups", b"subs", b"zero",
];

/// Font subsetter with builder pattern.
///
/// Collects the characters to keep and the layout features to retain before
/// running the subset.
#[derive(Debug, Clone, Default)]
pub struct Subsetter {
    characters: BTreeSet<char>,
    retain_glyph_names: bool,
    layout_features: Vec<[u8; 4]>,
}

impl Subsetter {
    /// Creates a subsetter with no characters and the standard [`LAYOUT_FEATURES`].
    pub fn new() -> Self {
        Self {
            layout_features: LAYOUT_FEATURES.iter().map(|f| **f).collect(),
            ..Default::default()
        }
    }

    /// Adds characters whose glyphs the subset must contain.
    pub fn with_characters(mut self, characters: impl IntoIterator<Item = char>) -> Self {
        self.characters.extend(characters);
        self
    }

    /// Sets whether to retain glyph names in the subset.
    ///
    /// Glyph names help debugging but increase file size.
    pub fn retain_glyph_names(mut self, retain: bool) -> Self {
        self.retain_glyph_names = retain;
        self
    }

    /// Sets the layout features to retain in the subset.
    ///
    /// Replaces any previously configured layout features.
    pub fn with_layout_features(mut self, features: impl IntoIterator<Item = [u8; 4]>) -> Self {
        self.layout_features = features.into_iter().collect();
        self
    }

    pub fn characters(&self) -> &BTreeSet<char> {
        &self.characters
    }

    /// Subsets SFNT font data and returns the result as SFNT data.
    ///
    /// Characters the font has no glyph for are skipped by HarfBuzz; use
    /// [`uncovered_characters`] to report them.
    pub fn subset(&self, data: &[u8]) -> Result<Vec<u8>> {
        FontRef::new(data).context("Failed to parse font")?;

        let mut input = SubsetInput::new()?;

        if self.retain_glyph_names {
            input.flags().retain_glyph_names();
        }

        {
            let mut feature_set = input.layout_feature_tag_set();
            for tag in &self.layout_features {
                feature_set.insert(Tag::new(tag));
            }
        }

        {
            let mut unicode_set = input.unicode_set();
            for &c in &self.characters {
                unicode_set.insert(c);
            }
        }

        let font = FontFace::new(Blob::from_bytes(data)?)?;
        let subset_font = input.subset_font(&font).context("HarfBuzz failed to subset font")?;
        let subset = subset_font.underlying_blob().to_vec();

        debug!(
            "Subset {} characters: {} -> {} bytes",
            self.characters.len(),
            data.len(),
            subset.len()
        );
        Ok(subset)
    }
}

/// Returns the characters, in input order, that the font's `cmap` does not
/// map to a real glyph.
pub fn uncovered_characters(
    data: &[u8],
    characters: impl IntoIterator<Item = char>,
) -> Result<Vec<char>> {
    let font = FontRef::new(data).context("Failed to parse font")?;
    let cmap = font.cmap().context("Failed to read cmap table")?;

    Ok(characters
        .into_iter()
        .filter(|&c| cmap.map_codepoint(c).is_none_or(|gid| gid.to_u32() == 0))
        .collect())
}

/// Subsets font data to the given characters (convenience function).
///
/// This is equivalent to `Subsetter::new().with_characters(characters).subset(data)`.
pub fn subset_characters(data: &[u8], characters: impl IntoIterator<Item = char>) -> Result<Vec<u8>> {
    Subsetter::new().with_characters(characters).subset(data)
}
