//! Unwrapping WOFF and WOFF2 containers to SFNT.

use std::borrow::Cow;

use allsorts::{binary::read::ReadScope, font_data::FontData, tables::FontTableProvider};
use anyhow::{Context, Result, anyhow, bail};
use log::debug;
use read_fonts::types::Tag;
use write_fonts::FontBuilder;

use crate::FontFormat;

/// Returns SFNT data for a font in any supported container.
///
/// SFNT input is borrowed as-is; WOFF and WOFF2 input is decompressed and
/// reassembled into a new table directory.
pub fn to_sfnt(data: &[u8]) -> Result<Cow<'_, [u8]>> {
    match FontFormat::sniff(data) {
        Some(FontFormat::Sfnt) => Ok(Cow::Borrowed(data)),
        Some(format) => unwrap_container(data, format).map(Cow::Owned),
        None => bail!("Unrecognized font data (expected TrueType, OpenType, WOFF or WOFF2)"),
    }
}

fn unwrap_container(data: &[u8], format: FontFormat) -> Result<Vec<u8>> {
    let font_file = ReadScope::new(data)
        .read::<FontData<'_>>()
        .map_err(|err| anyhow!("Failed to parse {format} font: {err:?}"))?;
    let provider = font_file
        .table_provider(0)
        .map_err(|err| anyhow!("Failed to read {format} tables: {err:?}"))?;
    let tags = provider.table_tags().with_context(|| format!("{format} font lists no tables"))?;

    let mut builder = FontBuilder::new();
    for tag in &tags {
        let table = provider.read_table_data(*tag).map_err(|err| {
            anyhow!("Failed to decode table {} from {format} font: {err:?}", Tag::from_be_bytes(tag.to_be_bytes()))
        })?;
        builder.add_raw(Tag::from_be_bytes(tag.to_be_bytes()), table.into_owned());
    }

    let sfnt = builder.build();
    debug!("Decoded {format}: {} tables, {} -> {} bytes", tags.len(), data.len(), sfnt.len());
    Ok(sfnt)
}
