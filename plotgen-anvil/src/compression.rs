//! Chunk framing: `[length:4][compression:1][compressed_nbt:N]`.

use std::io::{Read, Write};

use anyhow::{Context, Result, bail, ensure};
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

/// Compression type byte for zlib.
pub const COMPRESSION_ZLIB: u8 = 2;

const FRAME_HEADER: usize = 5;

/// Compress NBT bytes with zlib and prepend the length + type header.
/// The length counts the type byte plus the payload.
pub fn compress_and_wrap_chunk(nbt: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(nbt).context("Failed to compress chunk")?;
    let compressed = encoder.finish().context("Failed to finish compression")?;

    let total_len = u32::try_from(compressed.len() + 1).context("Compressed chunk too large")?;
    let mut result = Vec::with_capacity(FRAME_HEADER + compressed.len());
    result.extend_from_slice(&total_len.to_be_bytes());
    result.push(COMPRESSION_ZLIB);
    result.extend_from_slice(&compressed);

    Ok(result)
}

/// Strip the frame header and inflate the payload.
pub fn unwrap_and_decompress(blob: &[u8]) -> Result<Vec<u8>> {
    ensure!(blob.len() >= FRAME_HEADER, "Chunk frame truncated: {} bytes", blob.len());

    let total_len = u32::from_be_bytes([blob[0], blob[1], blob[2], blob[3]]) as usize;
    let compression = blob[4];
    if compression != COMPRESSION_ZLIB {
        bail!("Unsupported compression type {compression}");
    }
    ensure!(total_len >= 1, "Chunk frame has zero length");
    let end = 4 + total_len;
    ensure!(
        blob.len() >= end,
        "Chunk frame truncated: header says {} bytes, have {}",
        total_len,
        blob.len() - 4
    );

    let mut nbt = Vec::new();
    ZlibDecoder::new(&blob[FRAME_HEADER..end])
        .read_to_end(&mut nbt)
        .context("Failed to decompress chunk")?;
    Ok(nbt)
}
