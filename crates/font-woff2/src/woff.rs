//! WOFF 1.0 encoding.

use std::io::Write;

use anyhow::{Context, Result};
use flate2::{Compression, write::ZlibEncoder};
use log::debug;

use crate::sfnt::{SfntTables, pad_to_4, patch_u32, write_u16, write_u32};

const WOFF_SIGNATURE: u32 = 0x774F_4646;
const WOFF_HEADER_LEN: usize = 44;
const WOFF_DIRECTORY_ENTRY_LEN: usize = 20;
const LENGTH_OFFSET: usize = 8;

/// Encodes SFNT data as WOFF 1.0.
///
/// Each table is zlib-compressed on its own and stored uncompressed when
/// compression does not make it smaller.
pub fn encode_woff(sfnt: &[u8]) -> Result<Vec<u8>> {
    let font = SfntTables::parse(sfnt)?;

    let mut buffer = Vec::with_capacity(sfnt.len());
    write_u32(&mut buffer, WOFF_SIGNATURE);
    write_u32(&mut buffer, font.flavor);
    write_u32(&mut buffer, 0); // length, patched below
    write_u16(&mut buffer, font.num_tables()?);
    write_u16(&mut buffer, 0); // reserved
    write_u32(&mut buffer, font.total_sfnt_size()?);
    write_u16(&mut buffer, 0); // major version
    write_u16(&mut buffer, 0); // minor version
    write_u32(&mut buffer, 0); // metadata offset
    write_u32(&mut buffer, 0); // metadata length
    write_u32(&mut buffer, 0); // original metadata length
    write_u32(&mut buffer, 0); // private block offset
    write_u32(&mut buffer, 0); // private block length
    debug_assert_eq!(buffer.len(), WOFF_HEADER_LEN);

    let mut table_data = Vec::new();
    let data_start = WOFF_HEADER_LEN + WOFF_DIRECTORY_ENTRY_LEN * font.tables.len();

    for table in &font.tables {
        let compressed = compress(table.data)?;
        let stored = if compressed.len() < table.data.len() { &compressed[..] } else { table.data };

        let offset = u32::try_from(data_start + table_data.len()).context("WOFF file is too large")?;
        let stored_len = u32::try_from(stored.len()).context("WOFF table is too large")?;

        buffer.extend_from_slice(&table.tag.to_be_bytes());
        write_u32(&mut buffer, offset);
        write_u32(&mut buffer, stored_len);
        write_u32(&mut buffer, table.len()?);
        write_u32(&mut buffer, table.checksum);

        table_data.extend_from_slice(stored);
        pad_to_4(&mut table_data);
    }
    buffer.extend_from_slice(&table_data);

    let length = u32::try_from(buffer.len()).context("WOFF file is too large")?;
    patch_u32(&mut buffer, LENGTH_OFFSET, length);

    debug!("Encoded WOFF: {} tables, {} -> {} bytes", font.tables.len(), sfnt.len(), buffer.len());
    Ok(buffer)
}

fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data).context("Failed to compress font table")?;
    encoder.finish().context("Failed to compress font table")
}
