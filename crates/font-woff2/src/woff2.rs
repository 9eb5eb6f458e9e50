//! WOFF2 encoding.
//!
//! Every table is stored untransformed: `glyf` and `loca` carry transform
//! version 3 (null transform), all other tables version 0. The table data is
//! concatenated without padding and compressed as one brotli stream.

use std::io::Write;

use anyhow::{Context, Result};
use brotli::CompressorWriter;
use log::debug;
use read_fonts::types::Tag;

use crate::sfnt::{SfntTable, SfntTables, patch_u32, pad_to_4, write_u16, write_u32};

const WOFF2_SIGNATURE: u32 = 0x774F_4632;
const WOFF2_HEADER_LEN: usize = 48;
const LENGTH_OFFSET: usize = 8;

const BROTLI_BUFFER_SIZE: usize = 4096;
const BROTLI_QUALITY: u32 = 11;
const BROTLI_WINDOW_BITS: u32 = 22;

/// Flag value announcing an explicit tag after the flags byte.
const ARBITRARY_TAG: u8 = 63;
const NULL_TRANSFORM: u8 = 0b1100_0000;

/// Tags with a predefined index in the WOFF2 table directory.
const KNOWN_TAGS: [&[u8; 4]; 63] = [
    b"cmap", b"head", b"hhea", b"hmtx", b"maxp", b"name", b"OS/2", b"post", b"cvt ", b"fpgm",
    b"glyf", b"loca", b"prep", b"CFF ", b"VORG", b"EBDT", b"EBLC", b"gasp", b"hdmx", b"kern",
    b"LTSH", b"PCLT", b"VDMX", b"vhea", b"vmtx", b"BASE", b"GDEF", b"GPOS", b"GSUB", b"EBSC",
    b"JSTF", b"MATH", b"CBDT", b"CBLC", b"COLR", b"CPAL", b"SVG ", b"sbix", b"acnt", b"avar",
    b"bdat", b"bloc", b"bsln", b"cvar", b"fdsc", b"feat", b"fmtx", b"fvar", b"gvar", b"hsty",
    b"just", b"lcar", b"mort", b"morx", b"opbd", b"prop", b"trak", b"Zapf", b"Silf", b"Glat",
    b"Gloc", b"Feat", b"Sill",
];

/// Encodes SFNT data as WOFF2.
pub fn encode_woff2(sfnt: &[u8]) -> Result<Vec<u8>> {
    let font = SfntTables::parse(sfnt)?;

    let stream: Vec<u8> = font.tables.iter().flat_map(|table| table.data).copied().collect();
    let compressed = compress(&stream)?;

    let mut buffer = Vec::with_capacity(WOFF2_HEADER_LEN + 6 * font.tables.len() + compressed.len());
    write_u32(&mut buffer, WOFF2_SIGNATURE);
    write_u32(&mut buffer, font.flavor);
    write_u32(&mut buffer, 0); // length, patched below
    write_u16(&mut buffer, font.num_tables()?);
    write_u16(&mut buffer, 0); // reserved
    write_u32(&mut buffer, font.total_sfnt_size()?);
    write_u32(&mut buffer, u32::try_from(compressed.len()).context("Compressed data is too large")?);
    write_u16(&mut buffer, 0); // major version
    write_u16(&mut buffer, 0); // minor version
    write_u32(&mut buffer, 0); // metadata offset
    write_u32(&mut buffer, 0); // metadata length
    write_u32(&mut buffer, 0); // original metadata length
    write_u32(&mut buffer, 0); // private block offset
    write_u32(&mut buffer, 0); // private block length
    debug_assert_eq!(buffer.len(), WOFF2_HEADER_LEN);

    for table in &font.tables {
        write_table_entry(&mut buffer, table)?;
    }
    buffer.extend_from_slice(&compressed);
    pad_to_4(&mut buffer);

    let length = u32::try_from(buffer.len()).context("WOFF2 file is too large")?;
    patch_u32(&mut buffer, LENGTH_OFFSET, length);

    debug!(
        "Encoded WOFF2: {} tables, {} -> {} bytes",
        font.tables.len(),
        stream.len(),
        buffer.len()
    );
    Ok(buffer)
}

fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut writer =
        CompressorWriter::new(Vec::new(), BROTLI_BUFFER_SIZE, BROTLI_QUALITY, BROTLI_WINDOW_BITS);
    writer.write_all(data).context("Failed to compress font tables")?;
    Ok(writer.into_inner())
}

fn table_flags(tag: Tag) -> Option<u8> {
    let bytes = tag.to_be_bytes();
    let index = KNOWN_TAGS.iter().position(|known| **known == bytes)?;
    // The table has 63 entries, so the index fits in the low six bits.
    let mut flags = index as u8;
    if tag == Tag::new(b"glyf") || tag == Tag::new(b"loca") {
        flags |= NULL_TRANSFORM;
    }
    Some(flags)
}

fn write_table_entry(buffer: &mut Vec<u8>, table: &SfntTable<'_>) -> Result<()> {
    match table_flags(table.tag) {
        Some(flags) => buffer.push(flags),
        None => {
            buffer.push(ARBITRARY_TAG);
            buffer.extend_from_slice(&table.tag.to_be_bytes());
        }
    }
    write_uint_base128(buffer, table.len()?);
    Ok(())
}

fn write_uint_base128(buffer: &mut Vec<u8>, value: u32) {
    for shift in [28, 21, 14, 7] {
        if value >= 1 << shift {
            buffer.push(0x80 | ((value >> shift) & 0x7F) as u8);
        }
    }
    buffer.push((value & 0x7F) as u8);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tests::sample_sfnt, to_sfnt};

    #[test]
    fn test_uint_base128() {
        let samples: &[(u32, &[u8])] = &[
            (0, &[0]),
            (1, &[1]),
            (127, &[127]),
            (128, &[0x81, 0]),
            (129, &[0x81, 1]),
            (16_383, &[0xFF, 0x7F]),
            (16_384, &[0x81, 0x80, 0]),
            (u32::MAX, &[0x8F, 0xFF, 0xFF, 0xFF, 0x7F]),
        ];
        for &(value, expected) in samples {
            let mut buffer = vec![];
            write_uint_base128(&mut buffer, value);
            assert_eq!(buffer, expected, "encoding {value}");
        }
    }

    #[test]
    fn test_known_tag_flags() {
        assert_eq!(KNOWN_TAGS.len(), 63);
        assert_eq!(table_flags(Tag::new(b"cmap")), Some(0));
        assert_eq!(table_flags(Tag::new(b"OS/2")), Some(6));
        assert_eq!(table_flags(Tag::new(b"glyf")), Some(10 | NULL_TRANSFORM));
        assert_eq!(table_flags(Tag::new(b"loca")), Some(11 | NULL_TRANSFORM));
        assert_eq!(table_flags(Tag::new(b"GSUB")), Some(28));
        assert_eq!(table_flags(Tag::new(b"Zzzz")), None);
    }

    #[test]
    fn test_arbitrary_tag_entry() {
        let data = [1_u8; 200];
        let table = SfntTable { tag: Tag::new(b"Zzzz"), checksum: 0, data: &data };
        let mut buffer = vec![];
        write_table_entry(&mut buffer, &table).unwrap();
        assert_eq!(buffer, [ARBITRARY_TAG, b'Z', b'z', b'z', b'z', 0x81, 0x48]);
    }

    #[test]
    fn test_header() {
        let sfnt = sample_sfnt();
        let woff2 = encode_woff2(&sfnt).unwrap();

        assert_eq!(&woff2[..4], b"wOF2");
        assert_eq!(&woff2[4..8], &sfnt[..4]);
        assert_eq!(u32::from_be_bytes(woff2[8..12].try_into().unwrap()) as usize, woff2.len());
        assert_eq!(u16::from_be_bytes([woff2[12], woff2[13]]), 4);
        assert_eq!(woff2.len() % 4, 0);
    }

    #[test]
    fn test_decodes_to_same_tables() {
        let sfnt = sample_sfnt();
        let woff2 = encode_woff2(&sfnt).unwrap();
        let decoded = to_sfnt(&woff2).unwrap();

        let original = SfntTables::parse(&sfnt).unwrap();
        let roundtrip = SfntTables::parse(&decoded).unwrap();
        assert_eq!(original.tables.len(), roundtrip.tables.len());
        for (expected, actual) in original.tables.iter().zip(&roundtrip.tables) {
            assert_eq!(expected.tag, actual.tag);
            assert_eq!(expected.data, actual.data, "table {}", expected.tag);
        }
    }
}
