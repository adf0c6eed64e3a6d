//! Error types for the huffpack codec.
//!
//! Every fallible operation returns a structured error rather than panicking.
//! Malformed containers surface as `CorruptContainer` or `CorruptPayload`,
//! never as an out-of-bounds index.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to one failure domain:
/// - Empty input: nothing to compress
/// - Unknown symbol: code book and input disagree (internal invariant breach)
/// - Corrupt container: header or framing of a persisted artifact is invalid
/// - Corrupt payload: the packed bits do not decode cleanly
/// - I/O: storage access, propagated unchanged
#[derive(Debug, Error)]
pub enum Error {
    /// Compression of a zero-length input is an explicit failure
    #[error("input is empty: nothing to compress")]
    EmptyInput,

    /// A symbol has no entry in the code book
    #[error("symbol {symbol:#04x} has no code in the code book")]
    UnknownSymbol { symbol: u8 },

    /// The container header or framing is malformed
    #[error("corrupt container: {0}")]
    CorruptContainer(#[from] ContainerError),

    /// The packed payload does not decode to a valid symbol sequence
    #[error("corrupt payload: {0}")]
    CorruptPayload(#[from] PayloadError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Container header and framing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContainerError {
    /// Invalid magic number at the start of the container
    #[error("invalid magic number: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Format version this build does not understand
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u8),

    /// A header section ends before its declared size
    #[error("truncated {section}: need {required} bytes, got {actual}")]
    Truncated {
        section: &'static str,
        required: usize,
        actual: usize,
    },

    /// Entry count outside 1..=256
    #[error("invalid symbol table entry count {0}")]
    InvalidEntryCount(u16),

    /// The same symbol appears twice in the symbol table
    #[error("symbol {0:#04x} appears more than once in the symbol table")]
    DuplicateSymbol(u8),

    /// A symbol table entry carries a zero count
    #[error("symbol {0:#04x} has a zero frequency")]
    ZeroFrequency(u8),

    /// Sum of frequencies does not fit in 64 bits
    #[error("symbol frequencies overflow a 64-bit total")]
    FrequencyOverflow,

    /// Fewer payload bytes than the bit count requires
    #[error("payload length mismatch: bit count needs {expected} bytes, got {actual}")]
    PayloadLengthMismatch { expected: usize, actual: usize },

    /// Bytes present beyond the declared payload
    #[error("{0} unexpected bytes after the payload")]
    TrailingBytes(usize),

    /// CRC-32 over the header fields and payload does not match the stored value
    #[error("checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
}

/// Payload decoding errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// Bits left in the accumulator after the declared bit count
    #[error("{bits} trailing bits do not form a complete code")]
    TrailingBits { bits: usize },

    /// Accumulator grew longer than any code without matching
    #[error("no code matches the bits ending at position {position}")]
    CodeTooLong { position: usize },

    /// Number of decoded symbols differs from the frequency total
    #[error("decoded {actual} symbols, header declares {expected}")]
    SymbolCountMismatch { expected: u64, actual: u64 },

    /// Declared bit count is larger than the supplied bytes
    #[error("bit count {bit_len} exceeds the {available} bits available")]
    BitCountExceedsData { bit_len: u64, available: u64 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
