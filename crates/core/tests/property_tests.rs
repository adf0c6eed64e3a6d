//! Property-based tests for the codec using proptest.

use huffpack_core::{compress, decompress, Container, Error, FrequencyTable, PrefixTree};
use proptest::prelude::*;

/// Inputs drawn from a small alphabet so equal frequencies (ties) are common.
fn tie_heavy_input() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"abcd".to_vec()), 1..200)
}

proptest! {
    #[test]
    fn prop_round_trip(input in prop::collection::vec(any::<u8>(), 1..2048)) {
        let compressed = compress(&input).unwrap();
        prop_assert_eq!(decompress(&compressed.container).unwrap(), input);
    }

    #[test]
    fn prop_deterministic(input in tie_heavy_input()) {
        let first = compress(&input).unwrap();
        let second = compress(&input).unwrap();
        prop_assert_eq!(first.container, second.container);
    }

    #[test]
    fn prop_prefix_free(input in prop::collection::vec(any::<u8>(), 1..1024)) {
        let compressed = compress(&input).unwrap();
        prop_assert!(compressed.codebook.is_prefix_free());
        prop_assert!(compressed.codebook.iter().all(|(_, code)| !code.is_empty()));
    }

    #[test]
    fn prop_payload_bits_match_code_lengths(input in tie_heavy_input()) {
        let compressed = compress(&input).unwrap();
        let expected: u64 = input
            .iter()
            .map(|&b| compressed.codebook.code(b).unwrap().len() as u64)
            .sum();
        prop_assert_eq!(compressed.stats.payload_bits, expected);
        prop_assert_eq!(compressed.compressed_size(), expected.div_ceil(8));
    }

    #[test]
    fn prop_tree_covers_table(input in prop::collection::vec(any::<u8>(), 1..512)) {
        let table = FrequencyTable::from_bytes(&input).unwrap();
        let tree = PrefixTree::build(&table);
        prop_assert_eq!(tree.leaf_count(), table.len());
        prop_assert_eq!(tree.root().frequency(), input.len() as u64);
    }

    /// Any truncation of a valid container fails instead of decoding garbage.
    #[test]
    fn prop_truncation_rejected(
        input in prop::collection::vec(any::<u8>(), 1..256),
        cut in 1usize..64,
    ) {
        let compressed = compress(&input).unwrap();
        let keep = compressed.container.len().saturating_sub(cut);
        let result = decompress(&compressed.container[..keep]);
        prop_assert!(matches!(
            result,
            Err(Error::CorruptContainer(_)) | Err(Error::CorruptPayload(_))
        ));
    }

    /// Arbitrary bytes never panic the parser.
    #[test]
    fn prop_parse_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = Container::parse(&bytes);
        let _ = decompress(&bytes);
    }
}
