//! Summary statistics for a compression or decompression run.
//!
//! `compressed_size` counts the packed payload bytes; `container_size` counts
//! the whole artifact including the header. The ratio is
//! `1 - compressed / original` and is reported as-is when negative.

use std::fmt;
use std::time::Duration;

/// Sizes and timing for one pipeline invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionStats {
    /// Bytes of raw input (or decoded output)
    pub original_size: u64,

    /// Bytes of packed payload
    pub compressed_size: u64,

    /// Bytes of the serialized container (header + payload)
    pub container_size: u64,

    /// Distinct symbols in the frequency table
    pub distinct_symbols: usize,

    /// Valid bits in the packed payload
    pub payload_bits: u64,

    /// Longest code in the code book
    pub max_code_len: usize,

    /// Wall time spent in the pipeline
    pub elapsed: Duration,
}

impl CompressionStats {
    /// Compression ratio `1 - compressed / original`.
    ///
    /// Returns 0.0 for an empty original.
    pub fn ratio(&self) -> f64 {
        if self.original_size == 0 {
            0.0
        } else {
            1.0 - self.compressed_size as f64 / self.original_size as f64
        }
    }

    /// Ratio expressed as a percentage.
    pub fn space_saving_percent(&self) -> f64 {
        self.ratio() * 100.0
    }

    /// Average payload bits spent per input symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.original_size == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.original_size as f64
        }
    }

    /// Ratio computed over the whole container instead of the payload.
    pub fn container_ratio(&self) -> f64 {
        if self.original_size == 0 {
            0.0
        } else {
            1.0 - self.container_size as f64 / self.original_size as f64
        }
    }

    /// Throughput over the original size in bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.original_size as f64 / secs
        }
    }

    /// Export as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "original_size={}\n\
             compressed_size={}\n\
             container_size={}\n\
             ratio={:.4}\n\
             distinct_symbols={}\n\
             payload_bits={}\n\
             bits_per_symbol={:.4}\n\
             max_code_len={}\n\
             elapsed_us={}\n",
            self.original_size,
            self.compressed_size,
            self.container_size,
            self.ratio(),
            self.distinct_symbols,
            self.payload_bits,
            self.bits_per_symbol(),
            self.max_code_len,
            self.elapsed.as_micros(),
        )
    }
}

impl fmt::Display for CompressionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Original:   {} bytes", self.original_size)?;
        writeln!(f, "Compressed: {} bytes", self.compressed_size)?;
        writeln!(f, "Container:  {} bytes", self.container_size)?;
        writeln!(f, "Ratio:      {:.2}%", self.space_saving_percent())?;
        writeln!(
            f,
            "Symbols:    {} distinct, {:.3} bits/symbol, longest code {} bits",
            self.distinct_symbols,
            self.bits_per_symbol(),
            self.max_code_len
        )?;
        write!(f, "Time:       {:.3} ms", self.elapsed.as_secs_f64() * 1000.0)
    }
}
