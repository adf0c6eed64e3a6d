//! huffpack-core: lossless Huffman compression into a self-describing container
//!
//! This library turns a byte buffer into a compact container and back:
//! - Counts byte frequencies in first-observed order
//! - Builds a prefix tree with deterministic tie-breaking
//! - Derives a prefix-free code book from the tree
//! - Packs codes MSB-first with an exact bit count
//! - Frames everything in a container that decodes on its own
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `frequency`: Symbol frequency table
//! - `tree`: Prefix tree construction
//! - `codebook`: Forward and reverse code maps
//! - `bitio`: Low-level bit reading/writing
//! - `payload`: Packing symbols into bits and decoding them back
//! - `container`: Container serialization, parsing and file access
//! - `pipeline`: End-to-end compress/decompress
//! - `stats`: Sizes, ratio and timing of a run
//!
//! # Design Principles
//!
//! - **No panics**: Malformed containers produce structured errors
//! - **Deterministic**: The same input always yields the same container
//! - **Stateless**: Decompression needs nothing but the container bytes
//!
//! # Example
//! ```
//! let compressed = huffpack_core::compress(b"abracadabra").unwrap();
//! let restored = huffpack_core::decompress(&compressed.container).unwrap();
//! assert_eq!(restored, b"abracadabra");
//! ```

pub mod bitio;
pub mod codebook;
pub mod container;
pub mod error;
pub mod frequency;
pub mod payload;
pub mod pipeline;
pub mod stats;
pub mod tree;

// Re-export commonly used types
pub use codebook::{Code, CodeBook, ParseCodeError};
pub use container::Container;
pub use error::{ContainerError, Error, PayloadError, Result};
pub use frequency::FrequencyTable;
pub use payload::PackedPayload;
pub use pipeline::{
    compress, compress_file, decompress, decompress_file, decompress_with_stats, Compressed,
    Decompressed,
};
pub use stats::CompressionStats;
pub use tree::{Node, PrefixTree};
