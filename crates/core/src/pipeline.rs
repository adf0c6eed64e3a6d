//! Compression and decompression pipelines.
//!
//! Compression: frequency table -> prefix tree -> code book -> packed
//! payload -> container. Decompression runs the other way, rebuilding the
//! code book from the container header. Every intermediate value is local to
//! one call, so concurrent calls on independent inputs need no locking.

use crate::codebook::CodeBook;
use crate::container::{self, Container};
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::payload;
use crate::stats::CompressionStats;
use std::path::Path;
use std::time::Instant;

/// Result of a successful compression.
#[derive(Debug, Clone)]
pub struct Compressed {
    /// Complete serialized container
    pub container: Vec<u8>,

    /// Code book used for the payload
    pub codebook: CodeBook,

    /// Symbol counts of the input, in first-observed order
    pub frequencies: FrequencyTable,

    /// Sizes, ratio and timing
    pub stats: CompressionStats,
}

impl Compressed {
    pub fn original_size(&self) -> u64 {
        self.stats.original_size
    }

    /// Packed payload bytes.
    pub fn compressed_size(&self) -> u64 {
        self.stats.compressed_size
    }

    /// Whole container bytes, header included.
    pub fn container_size(&self) -> u64 {
        self.stats.container_size
    }

    /// `1 - compressed / original`, possibly negative.
    pub fn ratio(&self) -> f64 {
        self.stats.ratio()
    }
}

/// Result of a successful decompression.
#[derive(Debug, Clone)]
pub struct Decompressed {
    /// The reconstructed original bytes
    pub data: Vec<u8>,

    /// Sizes, ratio and timing
    pub stats: CompressionStats,
}

/// Compress `input` into a self-describing container.
///
/// # Errors
/// - `Error::EmptyInput` for a zero-length input; nothing is produced
/// - `Error::UnknownSymbol` on an internal code book mismatch
pub fn compress(input: &[u8]) -> Result<Compressed> {
    let started = Instant::now();

    let (container, codebook) = build_container(input)?;
    let bytes = container.to_bytes();

    let stats = CompressionStats {
        original_size: input.len() as u64,
        compressed_size: container.payload.len() as u64,
        container_size: bytes.len() as u64,
        distinct_symbols: codebook.len(),
        payload_bits: container.bit_len,
        max_code_len: codebook.max_code_len(),
        elapsed: started.elapsed(),
    };

    if stats.container_size >= stats.original_size {
        log::warn!(
            "container ({} bytes) is not smaller than the input ({} bytes)",
            stats.container_size,
            stats.original_size
        );
    }
    log::info!(
        "compressed {} -> {} bytes ({:.2}%)",
        stats.original_size,
        stats.compressed_size,
        stats.space_saving_percent()
    );

    Ok(Compressed {
        container: bytes,
        codebook,
        frequencies: container.frequencies,
        stats,
    })
}

/// Reconstruct the original bytes from a container.
pub fn decompress(container: &[u8]) -> Result<Vec<u8>> {
    decompress_with_stats(container).map(|decompressed| decompressed.data)
}

/// Reconstruct the original bytes and report statistics.
///
/// # Errors
/// - `Error::CorruptContainer` for malformed framing or a checksum mismatch
/// - `Error::CorruptPayload` if the payload does not decode cleanly
pub fn decompress_with_stats(bytes: &[u8]) -> Result<Decompressed> {
    let started = Instant::now();

    let container = Container::parse(bytes)?;
    let codebook = container.codebook();
    let data = container.decode_with(&codebook)?;

    let stats = CompressionStats {
        original_size: data.len() as u64,
        compressed_size: container.payload.len() as u64,
        container_size: bytes.len() as u64,
        distinct_symbols: container.frequencies.len(),
        payload_bits: container.bit_len,
        max_code_len: codebook.max_code_len(),
        elapsed: started.elapsed(),
    };
    log::info!(
        "decompressed {} -> {} bytes",
        stats.container_size,
        stats.original_size
    );

    Ok(Decompressed { data, stats })
}

/// Compress the file at `input` and write the container to `output`.
///
/// The output file is only created once the whole container is built.
pub fn compress_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Compressed> {
    let raw = container::read_bytes(input)?;
    let compressed = compress(&raw)?;
    container::write_bytes(output, &compressed.container)?;
    Ok(compressed)
}

/// Decompress the container at `input` and write the original bytes to `output`.
pub fn decompress_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<Decompressed> {
    let bytes = container::read_bytes(input)?;
    let decompressed = decompress_with_stats(&bytes)?;
    container::write_bytes(output, &decompressed.data)?;
    Ok(decompressed)
}

fn build_container(input: &[u8]) -> Result<(Container, CodeBook)> {
    let frequencies = FrequencyTable::from_bytes(input)?;
    let codebook = CodeBook::from_table(&frequencies);
    let packed = payload::pack(input, &codebook)?;
    Ok((Container::new(frequencies, packed), codebook))
}
