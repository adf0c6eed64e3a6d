//! Payload packing and decoding.
//!
//! [`pack`] replaces every input symbol with its code and packs the bits
//! MSB-first. [`unpack`] reverses that with a growing accumulator that is
//! matched against the reverse code map after every bit; a match emits the
//! symbol and clears the accumulator. Because the codes are prefix-free the
//! first match is the only possible one.

use crate::bitio::{BitReader, BitWriter};
use crate::codebook::CodeBook;
use crate::error::{Error, PayloadError, Result};

/// Packed payload bytes with the exact number of valid bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedPayload {
    /// MSB-first packed bits, zero-padded to a byte boundary
    pub bytes: Vec<u8>,
    /// Number of valid bits in `bytes`
    pub bit_len: u64,
}

/// Encode `input` with `codes`.
///
/// # Errors
/// Returns `Error::UnknownSymbol` if a byte has no code. This cannot happen
/// when `codes` was derived from the same input's frequency table.
pub fn pack(input: &[u8], codes: &CodeBook) -> Result<PackedPayload> {
    let mut writer = BitWriter::new();

    for &symbol in input {
        let code = codes
            .code(symbol)
            .ok_or(Error::UnknownSymbol { symbol })?;
        writer.write_bits(code.bits());
    }

    let (bytes, bit_len) = writer.finish();
    log::debug!("packed {} symbols into {} bits", input.len(), bit_len);

    Ok(PackedPayload { bytes, bit_len })
}

/// Decode the first `bit_len` bits of `bytes` with `codes`.
///
/// Padding bits beyond `bit_len` are never examined.
///
/// # Errors
/// - `PayloadError::BitCountExceedsData` if `bytes` is shorter than `bit_len` bits
/// - `PayloadError::CodeTooLong` if the accumulator outgrows the longest code
/// - `PayloadError::TrailingBits` if unmatched bits remain at the end
pub fn unpack(bytes: &[u8], bit_len: u64, codes: &CodeBook) -> Result<Vec<u8>> {
    let reader = BitReader::new(bytes, bit_len)?;
    let max_code_len = codes.max_code_len();

    let mut output = Vec::new();
    let mut accumulator: Vec<bool> = Vec::with_capacity(max_code_len);

    for (position, bit) in reader.enumerate() {
        accumulator.push(bit);

        if let Some(symbol) = codes.symbol(&accumulator) {
            output.push(symbol);
            accumulator.clear();
        } else if accumulator.len() >= max_code_len {
            return Err(PayloadError::CodeTooLong { position }.into());
        }
    }

    if !accumulator.is_empty() {
        return Err(PayloadError::TrailingBits {
            bits: accumulator.len(),
        }
        .into());
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;

    fn codes_for(input: &[u8]) -> CodeBook {
        CodeBook::from_table(&FrequencyTable::from_bytes(input).unwrap())
    }

    #[test]
    fn test_pack_single_symbol() {
        let codes = codes_for(b"aaaa");
        let packed = pack(b"aaaa", &codes).unwrap();

        assert_eq!(packed.bit_len, 4);
        assert_eq!(packed.bytes, vec![0x00]);
        assert_eq!(unpack(&packed.bytes, packed.bit_len, &codes).unwrap(), b"aaaa");
    }

    #[test]
    fn test_pack_bit_order() {
        // a=0, b=1
        let codes = codes_for(b"abababab");
        let packed = pack(b"abababab", &codes).unwrap();

        assert_eq!(packed.bytes, vec![0b0101_0101]);
        assert_eq!(packed.bit_len, 8);
    }

    #[test]
    fn test_round_trip_text() {
        let input = b"it was the best of times, it was the worst of times";
        let codes = codes_for(input);
        let packed = pack(input, &codes).unwrap();

        assert_eq!(packed.bytes.len() as u64, packed.bit_len.div_ceil(8));
        assert_eq!(unpack(&packed.bytes, packed.bit_len, &codes).unwrap(), input);
    }

    #[test]
    fn test_unknown_symbol() {
        let codes = codes_for(b"abc");
        assert!(matches!(
            pack(b"abcd", &codes),
            Err(Error::UnknownSymbol { symbol: b'd' })
        ));
    }

    #[test]
    fn test_trailing_bits() {
        // c=0, a=10, b=11: a lone leading 1 is an incomplete code
        let codes = codes_for(b"abcc");
        let result = unpack(&[0b1000_0000], 1, &codes);
        assert!(matches!(
            result,
            Err(Error::CorruptPayload(PayloadError::TrailingBits { bits: 1 }))
        ));
    }

    #[test]
    fn test_unmatched_single_symbol_bit() {
        // The only code is 0; a 1 bit can never match
        let codes = codes_for(b"zz");
        let result = unpack(&[0b0100_0000], 2, &codes);
        assert!(matches!(
            result,
            Err(Error::CorruptPayload(PayloadError::CodeTooLong { position: 1 }))
        ));
    }

    #[test]
    fn test_padding_ignored() {
        // Nonzero padding after the declared bit count is not decoded
        let codes = codes_for(b"abababab");
        let decoded = unpack(&[0b0111_1111], 2, &codes).unwrap();
        assert_eq!(decoded, b"ab");
    }

    #[test]
    fn test_bit_count_exceeds_data() {
        let codes = codes_for(b"ab");
        assert!(matches!(
            unpack(&[0x00], 9, &codes),
            Err(Error::CorruptPayload(PayloadError::BitCountExceedsData { .. }))
        ));
    }
}
