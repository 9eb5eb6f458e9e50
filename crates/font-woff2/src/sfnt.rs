//! SFNT table directory access shared by the container encoders.

use anyhow::{Context, Result};
use read_fonts::{FontRef, types::Tag};

pub(crate) const SFNT_HEADER_LEN: usize = 12;
pub(crate) const SFNT_RECORD_LEN: usize = 16;

pub(crate) struct SfntTable<'a> {
    pub tag: Tag,
    pub checksum: u32,
    pub data: &'a [u8],
}

impl SfntTable<'_> {
    pub fn len(&self) -> Result<u32> {
        u32::try_from(self.data.len())
            .with_context(|| format!("Table {} is too large", self.tag))
    }
}

/// Tables of a single SFNT font, sorted by tag.
pub(crate) struct SfntTables<'a> {
    pub flavor: u32,
    pub tables: Vec<SfntTable<'a>>,
}

impl<'a> SfntTables<'a> {
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let font = FontRef::new(data).context("Failed to parse font")?;

        let mut tables = font
            .table_directory
            .table_records()
            .iter()
            .map(|record| {
                let tag = record.tag();
                let table = font
                    .table_data(tag)
                    .with_context(|| format!("Table {tag} is out of bounds"))?;
                Ok(SfntTable { tag, checksum: record.checksum(), data: table.as_bytes() })
            })
            .collect::<Result<Vec<_>>>()?;
        tables.sort_by_key(|table| table.tag);

        Ok(Self { flavor: font.table_directory.sfnt_version(), tables })
    }

    pub fn num_tables(&self) -> Result<u16> {
        u16::try_from(self.tables.len()).context("Too many tables")
    }

    /// Size of the font when laid out as an uncompressed SFNT.
    pub fn total_sfnt_size(&self) -> Result<u32> {
        let size = SFNT_HEADER_LEN
            + SFNT_RECORD_LEN * self.tables.len()
            + self.tables.iter().map(|table| padded_len(table.data.len())).sum::<usize>();
        u32::try_from(size).context("Font is too large")
    }
}

pub(crate) fn padded_len(len: usize) -> usize {
    len.div_ceil(4) * 4
}

pub(crate) fn pad_to_4(buffer: &mut Vec<u8>) {
    buffer.resize(padded_len(buffer.len()), 0);
}

pub(crate) fn write_u16(buffer: &mut Vec<u8>, value: u16) {
    buffer.extend_from_slice(&value.to_be_bytes());
}

pub(crate) fn write_u32(buffer: &mut Vec<u8>, value: u32) {
    buffer.extend_from_slice(&value.to_be_bytes());
}

/// Overwrites a big-endian `u32` in an already written header.
pub(crate) fn patch_u32(buffer: &mut [u8], offset: usize, value: u32) {
    buffer[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
}
