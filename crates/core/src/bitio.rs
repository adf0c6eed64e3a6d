//! Bit-level I/O for packed payloads.
//!
//! Both directions are MSB-first: the first bit written lands in the most
//! significant bit of the first byte.
//!
//! # Padding Rules
//! - BitWriter: pads the final partial byte with trailing zeros
//! - BitReader: stops at the declared bit count; padding is never yielded
//!
//! # Example
//! ```
//! use huffpack_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(&[true, false, true]);
//! writer.write_bits(&[true, true]);
//! assert_eq!(writer.bit_len(), 5);
//!
//! let (bytes, bit_len) = writer.finish();
//! assert_eq!(bytes, vec![0b1011_1000]);
//!
//! let reader = BitReader::new(&bytes, bit_len).unwrap();
//! let bits: Vec<bool> = reader.collect();
//! assert_eq!(bits, vec![true, false, true, true, true]);
//! ```

use crate::error::{PayloadError, Result};

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8
/// - unused low bits of `bit_buffer` are zero
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            ..Self::default()
        }
    }

    /// Append one bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 0x80 >> self.bit_count;
        }
        self.bit_count += 1;

        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Append a run of bits in order.
    pub fn write_bits(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.write_bit(bit);
        }
    }

    /// Total number of bits written (including the partial byte).
    pub fn bit_len(&self) -> u64 {
        self.bytes.len() as u64 * 8 + self.bit_count as u64
    }

    /// Finish writing and return the padded bytes with the exact bit count.
    pub fn finish(mut self) -> (Vec<u8>, u64) {
        let bit_len = self.bit_len();
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        (self.bytes, bit_len)
    }
}

/// Reads bits MSB-first from a byte buffer, up to a declared bit count.
///
/// # Invariants
/// - `bit_len` never exceeds `data.len() * 8`
/// - `bit_position` never exceeds `bit_len`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Source data
    data: &'a [u8],
    /// Number of valid bits in `data`
    bit_len: u64,
    /// Current bit position (0 = MSB of first byte)
    bit_position: u64,
}

impl<'a> BitReader<'a> {
    /// Create a reader over the first `bit_len` bits of `data`.
    ///
    /// # Errors
    /// Returns `PayloadError::BitCountExceedsData` if `data` holds fewer than
    /// `bit_len` bits.
    pub fn new(data: &'a [u8], bit_len: u64) -> Result<Self> {
        let available = data.len() as u64 * 8;
        if bit_len > available {
            return Err(PayloadError::BitCountExceedsData { bit_len, available }.into());
        }
        Ok(Self {
            data,
            bit_len,
            bit_position: 0,
        })
    }

    /// Read the next valid bit, or `None` at the declared end.
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.bit_position >= self.bit_len {
            return None;
        }
        let byte = self.data[(self.bit_position / 8) as usize];
        let bit = byte & (0x80 >> (self.bit_position % 8)) != 0;
        self.bit_position += 1;
        Some(bit)
    }

    /// Number of valid bits not yet read.
    pub fn bits_remaining(&self) -> u64 {
        self.bit_len - self.bit_position
    }

    /// Current bit position.
    pub fn position(&self) -> u64 {
        self.bit_position
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.read_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits_remaining() as usize;
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn bits(pattern: &str) -> Vec<bool> {
        pattern.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_write_read_single_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(&bits("10110011"));

        let (bytes, bit_len) = writer.finish();
        assert_eq!(bytes, vec![0b10110011]);
        assert_eq!(bit_len, 8);

        let reader = BitReader::new(&bytes, bit_len).unwrap();
        assert_eq!(reader.collect::<Vec<_>>(), bits("10110011"));
    }

    #[test]
    fn test_padding() {
        let mut writer = BitWriter::new();
        writer.write_bit(true);

        let (bytes, bit_len) = writer.finish();
        assert_eq!(bytes, vec![0b10000000]);
        assert_eq!(bit_len, 1);
    }

    #[test]
    fn test_multi_byte() {
        let mut writer = BitWriter::with_capacity(16);
        writer.write_bits(&bits("1010101111110000"));

        let (bytes, _) = writer.finish();
        assert_eq!(bytes, vec![0b10101011, 0b11110000]);
    }

    #[test]
    fn test_reader_ignores_padding() {
        let data = [0b1011_1111];
        let mut reader = BitReader::new(&data, 3).unwrap();

        assert_eq!(reader.read_bit(), Some(true));
        assert_eq!(reader.read_bit(), Some(false));
        assert_eq!(reader.read_bit(), Some(true));
        assert_eq!(reader.read_bit(), None);
        assert_eq!(reader.bits_remaining(), 0);
        assert_eq!(reader.position(), 3);
    }

    #[test]
    fn test_bit_len_beyond_data() {
        let data = [0xFF];
        assert!(matches!(
            BitReader::new(&data, 9),
            Err(Error::CorruptPayload(PayloadError::BitCountExceedsData {
                bit_len: 9,
                available: 8
            }))
        ));
    }

    #[test]
    fn test_empty_writer() {
        let writer = BitWriter::new();
        assert_eq!(writer.finish(), (Vec::new(), 0));
    }

    #[test]
    fn test_bits_remaining() {
        let data = vec![0xFF, 0xFF];
        let mut reader = BitReader::new(&data, 12).unwrap();

        assert_eq!(reader.bits_remaining(), 12);
        for _ in 0..5 {
            reader.read_bit();
        }
        assert_eq!(reader.bits_remaining(), 7);
        assert_eq!(reader.size_hint(), (7, Some(7)));
    }
}
