//! Container serialization and parsing.
//!
//! A container is the self-describing compressed artifact: it carries the
//! frequency table needed to rebuild the code book, the exact payload bit
//! count, and the packed payload. Nothing else is required to decompress.
//!
//! # Container Format
//!
//! All integers are little-endian.
//!
//! ```text
//! +----------------------+
//! | Magic (4 bytes)      |  0x48 0x55 0x46 0x50 ("HUFP")
//! +----------------------+
//! | version (1)          |  u8, currently 1
//! +----------------------+
//! | entry_count (2)      |  u16, 1..=256
//! +----------------------+
//! | entries              |  entry_count x (symbol u8, count u64)
//! | (9 bytes each)       |  in first-observed order
//! +----------------------+
//! | bit_len (8)          |  u64 valid payload bits
//! +----------------------+
//! | crc32 (4)            |  u32 checksum, see below
//! +----------------------+
//! | payload              |  ceil(bit_len / 8) bytes, MSB-first,
//! | (variable)           |  zero-padded
//! +----------------------+
//! ```
//!
//! The entry order is the tie-break order of tree construction, so it is
//! preserved exactly; the decoder rebuilds a bit-identical tree.
//!
//! The CRC covers version, entry_count, entries, bit_len and payload. Only
//! the magic and the checksum field itself are outside it, so a damaged
//! symbol table is rejected instead of rebuilding a different code book.

use crate::codebook::CodeBook;
use crate::error::{ContainerError, PayloadError, Result};
use crate::frequency::FrequencyTable;
use crate::payload::{self, PackedPayload};
use std::fs;
use std::path::Path;

/// Magic number for containers: "HUFP"
pub const MAGIC: [u8; 4] = [0x48, 0x55, 0x46, 0x50];

/// Current format version
pub const VERSION: u8 = 1;

/// Magic + version + entry count
const PREAMBLE_SIZE: usize = 7;

/// Size of one symbol table entry
const ENTRY_SIZE: usize = 9;

/// bit_len + crc32
const TRAILER_SIZE: usize = 12;

/// A parsed (or ready to serialize) container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Symbol counts in first-observed order
    pub frequencies: FrequencyTable,

    /// Number of valid bits in `payload`
    pub bit_len: u64,

    /// CRC32 over the header fields and `payload`
    pub crc32: u32,

    /// Packed payload bytes
    pub payload: Vec<u8>,
}

impl Container {
    /// Assemble a container from a frequency table and its packed payload.
    pub fn new(frequencies: FrequencyTable, packed: PackedPayload) -> Self {
        let crc32 = compute_checksum(&frequencies, packed.bit_len, &packed.bytes);
        Self {
            frequencies,
            bit_len: packed.bit_len,
            crc32,
            payload: packed.bytes,
        }
    }

    /// Serialized size in bytes.
    pub fn encoded_len(&self) -> usize {
        PREAMBLE_SIZE + self.frequencies.len() * ENTRY_SIZE + TRAILER_SIZE + self.payload.len()
    }

    /// Serialize into a complete byte image.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.encoded_len());

        bytes.extend_from_slice(&MAGIC);
        bytes.push(VERSION);
        bytes.extend_from_slice(&(self.frequencies.len() as u16).to_le_bytes());

        for (symbol, count) in self.frequencies.iter() {
            bytes.push(symbol);
            bytes.extend_from_slice(&count.to_le_bytes());
        }

        bytes.extend_from_slice(&self.bit_len.to_le_bytes());
        bytes.extend_from_slice(&self.crc32.to_le_bytes());
        bytes.extend_from_slice(&self.payload);

        bytes
    }

    /// Parse a container from bytes.
    ///
    /// The framing and checksum are validated here; decodability of the
    /// payload is checked by [`Container::decode`].
    ///
    /// # Errors
    /// - `ContainerError::Truncated` if a header section is cut short
    /// - `ContainerError::InvalidMagic` / `UnsupportedVersion` for foreign data
    /// - `ContainerError::InvalidEntryCount` for 0 or more than 256 entries
    /// - Symbol table errors from [`FrequencyTable::from_entries`]
    /// - `ContainerError::PayloadLengthMismatch` / `TrailingBytes` if the
    ///   payload size disagrees with the bit count
    /// - `ContainerError::ChecksumMismatch` if any covered byte was altered
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);

        let magic: [u8; 4] = cursor.take_array("magic")?;
        if magic != MAGIC {
            return Err(ContainerError::InvalidMagic {
                expected: MAGIC,
                actual: magic,
            }
            .into());
        }

        let [version]: [u8; 1] = cursor.take_array("version")?;
        if version != VERSION {
            return Err(ContainerError::UnsupportedVersion(version).into());
        }

        let entry_count = u16::from_le_bytes(cursor.take_array("entry count")?);
        if entry_count == 0 || entry_count > 256 {
            return Err(ContainerError::InvalidEntryCount(entry_count).into());
        }

        let table = cursor.take("symbol table", entry_count as usize * ENTRY_SIZE)?;
        let entries: Vec<(u8, u64)> = table
            .chunks_exact(ENTRY_SIZE)
            .map(|entry| {
                let mut count = [0u8; 8];
                count.copy_from_slice(&entry[1..]);
                (entry[0], u64::from_le_bytes(count))
            })
            .collect();
        let frequencies = FrequencyTable::from_entries(entries)?;

        let bit_len = u64::from_le_bytes(cursor.take_array("bit count")?);
        let crc32 = u32::from_le_bytes(cursor.take_array("checksum")?);

        let payload = cursor.rest();
        let expected = payload_len(bit_len).ok_or(ContainerError::PayloadLengthMismatch {
            expected: usize::MAX,
            actual: payload.len(),
        })?;
        if payload.len() < expected {
            return Err(ContainerError::PayloadLengthMismatch {
                expected,
                actual: payload.len(),
            }
            .into());
        }
        if payload.len() > expected {
            return Err(ContainerError::TrailingBytes(payload.len() - expected).into());
        }

        let actual = compute_checksum(&frequencies, bit_len, payload);
        if actual != crc32 {
            return Err(ContainerError::ChecksumMismatch {
                expected: crc32,
                actual,
            }
            .into());
        }

        Ok(Self {
            frequencies,
            bit_len,
            crc32,
            payload: payload.to_vec(),
        })
    }

    /// Rebuild the code book from the stored table.
    pub fn codebook(&self) -> CodeBook {
        CodeBook::from_table(&self.frequencies)
    }

    /// Decode the payload back into the original bytes.
    ///
    /// # Errors
    /// - Decoding errors from [`payload::unpack`]
    /// - `PayloadError::SymbolCountMismatch` if the decoded length differs
    ///   from the frequency total
    pub fn decode(&self) -> Result<Vec<u8>> {
        self.decode_with(&self.codebook())
    }

    /// Decode the payload with an already rebuilt code book.
    ///
    /// `codes` must come from [`Container::codebook`]; any other code book
    /// decodes to garbage or fails.
    pub fn decode_with(&self, codes: &CodeBook) -> Result<Vec<u8>> {
        let output = payload::unpack(&self.payload, self.bit_len, codes)?;

        if output.len() as u64 != self.frequencies.total() {
            return Err(PayloadError::SymbolCountMismatch {
                expected: self.frequencies.total(),
                actual: output.len() as u64,
            }
            .into());
        }

        Ok(output)
    }

    /// Read and parse a container file.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::parse(&read_bytes(path)?)
    }

    /// Write the container to `path`.
    ///
    /// The full image is built in memory before the file is touched.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<()> {
        write_bytes(path, &self.to_bytes())
    }
}

/// Read a whole file; I/O errors propagate unchanged.
pub(crate) fn read_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Write a complete byte image to `path`.
pub(crate) fn write_bytes(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes)?;
    Ok(())
}

/// CRC-32 over every serialized field after the magic, in wire order.
fn compute_checksum(frequencies: &FrequencyTable, bit_len: u64, payload: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();

    hasher.update(&[VERSION]);
    hasher.update(&(frequencies.len() as u16).to_le_bytes());
    for (symbol, count) in frequencies.iter() {
        hasher.update(&[symbol]);
        hasher.update(&count.to_le_bytes());
    }
    hasher.update(&bit_len.to_le_bytes());
    hasher.update(payload);

    hasher.finalize()
}

/// Payload bytes needed for `bit_len` bits, if addressable.
fn payload_len(bit_len: u64) -> Option<usize> {
    usize::try_from(bit_len.div_ceil(8)).ok()
}

/// Bounds-checked forward reader over the container bytes.
struct Cursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    fn take(&mut self, section: &'static str, len: usize) -> Result<&'a [u8]> {
        let bytes: &'a [u8] = self.bytes;
        let remaining = &bytes[self.position..];
        if remaining.len() < len {
            return Err(ContainerError::Truncated {
                section,
                required: len,
                actual: remaining.len(),
            }
            .into());
        }
        self.position += len;
        Ok(&remaining[..len])
    }

    fn take_array<const N: usize>(&mut self, section: &'static str) -> Result<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.take(section, N)?);
        Ok(array)
    }

    fn rest(self) -> &'a [u8] {
        &self.bytes[self.position..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn container_for(input: &[u8]) -> Container {
        let frequencies = FrequencyTable::from_bytes(input).unwrap();
        let codes = CodeBook::from_table(&frequencies);
        let packed = payload::pack(input, &codes).unwrap();
        Container::new(frequencies, packed)
    }

    #[test]
    fn test_serialize_parse_round_trip() {
        let input = b"hello world! this is a test.";
        let container = container_for(input);
        let bytes = container.to_bytes();

        assert_eq!(bytes.len(), container.encoded_len());

        let parsed = Container::parse(&bytes).unwrap();
        assert_eq!(parsed, container);
        assert_eq!(parsed.decode().unwrap(), input);
    }

    #[test]
    fn test_layout() {
        let bytes = container_for(b"aaaa").to_bytes();

        assert_eq!(&bytes[0..4], b"HUFP");
        assert_eq!(bytes[4], VERSION);
        assert_eq!(&bytes[5..7], &1u16.to_le_bytes());
        assert_eq!(bytes[7], b'a');
        assert_eq!(&bytes[8..16], &4u64.to_le_bytes());
        assert_eq!(&bytes[16..24], &4u64.to_le_bytes());
        assert_eq!(&bytes[28..], &[0x00]);
        assert_eq!(bytes.len(), 29);
    }

    #[test]
    fn test_entry_order_preserved() {
        let bytes = container_for(b"zyx").to_bytes();
        let symbols: Vec<u8> = (0..3).map(|i| bytes[7 + i * ENTRY_SIZE]).collect();
        assert_eq!(symbols, b"zyx");
    }

    #[test]
    fn test_invalid_magic() {
        let mut bytes = container_for(b"abc").to_bytes();
        bytes[0] = b'X';

        assert!(matches!(
            Container::parse(&bytes),
            Err(Error::CorruptContainer(ContainerError::InvalidMagic { .. }))
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let mut bytes = container_for(b"abc").to_bytes();
        bytes[4] = 2;

        assert!(matches!(
            Container::parse(&bytes),
            Err(Error::CorruptContainer(ContainerError::UnsupportedVersion(2)))
        ));
    }

    #[test]
    fn test_truncated_header() {
        let bytes = container_for(b"abc").to_bytes();

        for len in [0, 3, 5, 10, 7 + 3 * ENTRY_SIZE + 4] {
            assert!(
                matches!(
                    Container::parse(&bytes[..len]),
                    Err(Error::CorruptContainer(ContainerError::Truncated { .. }))
                ),
                "prefix of {len} bytes should be truncated"
            );
        }
    }

    #[test]
    fn test_entry_count_inconsistent_with_bytes() {
        let mut bytes = container_for(b"abc").to_bytes();
        bytes[5..7].copy_from_slice(&200u16.to_le_bytes());

        assert!(matches!(
            Container::parse(&bytes),
            Err(Error::CorruptContainer(ContainerError::Truncated {
                section: "symbol table",
                ..
            }))
        ));
    }

    #[test]
    fn test_entry_count_bounds() {
        let mut bytes = container_for(b"abc").to_bytes();
        bytes[5..7].copy_from_slice(&0u16.to_le_bytes());
        assert!(matches!(
            Container::parse(&bytes),
            Err(Error::CorruptContainer(ContainerError::InvalidEntryCount(0)))
        ));

        bytes[5..7].copy_from_slice(&257u16.to_le_bytes());
        assert!(matches!(
            Container::parse(&bytes),
            Err(Error::CorruptContainer(ContainerError::InvalidEntryCount(257)))
        ));
    }

    #[test]
    fn test_payload_truncated() {
        let bytes = container_for(b"the rain in spain").to_bytes();
        let result = Container::parse(&bytes[..bytes.len() - 1]);

        assert!(matches!(
            result,
            Err(Error::CorruptContainer(ContainerError::PayloadLengthMismatch { .. }))
        ));
    }

    #[test]
    fn test_trailing_bytes() {
        let mut bytes = container_for(b"abc").to_bytes();
        bytes.extend_from_slice(&[0, 0]);

        assert!(matches!(
            Container::parse(&bytes),
            Err(Error::CorruptContainer(ContainerError::TrailingBytes(2)))
        ));
    }

    #[test]
    fn test_huge_bit_count() {
        let mut container = container_for(b"abc");
        container.bit_len = u64::MAX;

        assert!(matches!(
            Container::parse(&container.to_bytes()),
            Err(Error::CorruptContainer(ContainerError::PayloadLengthMismatch { .. }))
        ));
    }

    fn assert_checksum_mismatch(bytes: &[u8]) {
        assert!(
            matches!(
                Container::parse(bytes),
                Err(Error::CorruptContainer(ContainerError::ChecksumMismatch { .. }))
            ),
            "altered container was accepted"
        );
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut bytes = container_for(b"test data for crc validation").to_bytes();
        let len = bytes.len();
        bytes[len - 1] ^= 0x01;

        assert_checksum_mismatch(&bytes);
    }

    #[test]
    fn test_swapped_entries_rejected() {
        // 'a' and 'b' swap codes if the table order changes
        let mut bytes = container_for(b"abababab").to_bytes();
        bytes.swap(7, 7 + ENTRY_SIZE);

        assert_checksum_mismatch(&bytes);
    }

    #[test]
    fn test_altered_symbol_rejected() {
        let mut bytes = container_for(b"hello world").to_bytes();
        bytes[7] ^= 0x20;

        assert_checksum_mismatch(&bytes);
    }

    #[test]
    fn test_altered_bit_count_rejected() {
        // 4 bits -> 5 bits still needs one payload byte
        let mut bytes = container_for(b"aaaa").to_bytes();
        bytes[16] = 5;

        assert_checksum_mismatch(&bytes);
    }

    #[test]
    fn test_symbol_count_mismatch() {
        let mut container = container_for(b"abababab");
        // Claim one fewer 'b' than was packed
        container.frequencies = FrequencyTable::from_entries(vec![(b'a', 4), (b'b', 3)]).unwrap();

        assert!(matches!(
            container.decode(),
            Err(Error::CorruptPayload(PayloadError::SymbolCountMismatch {
                expected: 7,
                actual: 8
            }))
        ));
    }

    #[test]
    fn test_decode_with_prebuilt_codebook() {
        let input = b"mississippi river";
        let container = container_for(input);
        let codes = container.codebook();

        assert_eq!(container.decode_with(&codes).unwrap(), input);
        assert_eq!(container.decode().unwrap(), input);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.huff");

        let container = container_for(b"persist me");
        container.write_file(&path).unwrap();

        let loaded = Container::read_file(&path).unwrap();
        assert_eq!(loaded, container);
        assert_eq!(loaded.decode().unwrap(), b"persist me");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Container::read_file(dir.path().join("absent.huff")),
            Err(Error::Io(_))
        ));
    }
}
