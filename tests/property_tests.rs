use huffpack::bitstream::BitCursor;
use huffpack::compression::decode::decode;
use huffpack::compression::encode::Encoder;
use huffpack::huffman_coding::code_table::build_code_table;
use huffpack::huffman_coding::code_tree::build_code_tree;
use huffpack::tools::freq_count::count_bytes;
use huffpack::{compress_bytes, decompress_bytes, Error, OrderedMap};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_bit_level_roundtrip(input in prop::collection::vec(any::<u8>(), 1..500)) {
        let freqs = count_bytes(&input).unwrap();
        let tree = build_code_tree(&freqs).unwrap();
        let table = build_code_table(&tree).unwrap();

        let mut bits: Vec<bool> = Vec::new();
        let report = Encoder::new(&table).encode(&input, &mut bits).unwrap();
        prop_assert_eq!(report.bits_written, bits.len() as u64);

        let output = decode(&mut BitCursor::new(&bits), &tree).unwrap();
        prop_assert_eq!(input, output);
    }

    #[test]
    fn test_packed_roundtrip(input in prop::collection::vec(0..8u8, 0..2000)) {
        let (packed, report) = compress_bytes(&input).unwrap();
        prop_assert_eq!(packed.len() as u64, report.compressed_size);
        prop_assert_eq!(decompress_bytes(&packed).unwrap(), input);
    }

    #[test]
    fn test_codes_are_prefix_free(input in prop::collection::vec(any::<u8>(), 0..300)) {
        let freqs = count_bytes(&input).unwrap();
        let table = build_code_table(&build_code_tree(&freqs).unwrap()).unwrap();
        prop_assert_eq!(table.len(), freqs.len());
        let codes: Vec<_> = table.values().collect();
        for (i, a) in codes.iter().enumerate() {
            prop_assert!(!a.is_empty());
            for b in codes.iter().skip(i + 1) {
                prop_assert!(!a.is_prefix_of(b) && !b.is_prefix_of(a));
            }
        }
    }

    #[test]
    fn test_tree_building_is_deterministic(input in prop::collection::vec(any::<u8>(), 0..300)) {
        let freqs = count_bytes(&input).unwrap();
        let first = build_code_tree(&freqs).unwrap();
        let second = build_code_tree(&freqs.clone()).unwrap();
        prop_assert_eq!(&first, &second);
        let a = build_code_table(&first).unwrap().to_vec();
        let b = build_code_table(&second).unwrap().to_vec();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn test_truncation_is_reported(input in prop::collection::vec(any::<u8>(), 1..200), cut in 1..64usize) {
        let freqs = count_bytes(&input).unwrap();
        let tree = build_code_tree(&freqs).unwrap();
        let table = build_code_table(&tree).unwrap();
        let mut bits: Vec<bool> = Vec::new();
        Encoder::new(&table).encode(&input, &mut bits).unwrap();

        let keep = bits.len().saturating_sub(cut);
        let result = decode(&mut BitCursor::new(&bits[..keep]), &tree);
        let truncated = matches!(result, Err(Error::TruncatedStream { .. }));
        prop_assert!(truncated);
    }

    #[test]
    fn test_map_get_returns_last_put(ops in prop::collection::vec((any::<u8>(), any::<u16>()), 0..300)) {
        let mut map = OrderedMap::new();
        let mut last = std::collections::HashMap::new();
        for (k, v) in ops {
            map.put(k, v).unwrap();
            last.insert(k, v);
        }
        prop_assert_eq!(map.len(), last.len());
        for (k, v) in &last {
            prop_assert_eq!(map.get(k), *v);
        }
        let keys: Vec<u8> = map.keys().copied().collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(keys.len(), map.len());
    }
}

#[test]
fn test_aaabbc_scenario() {
    let input = b"aaabbc";
    let freqs = count_bytes(input).unwrap();
    assert_eq!(
        freqs.to_string(),
        "key: 'a' value: 3\nkey: 'b' value: 2\nkey: 'c' value: 1\nkey: EOF value: 1\n"
    );

    let tree = build_code_tree(&freqs).unwrap();
    let table = build_code_table(&tree).unwrap();
    let len = |b: u8| table.get(&huffpack::Symbol::Byte(b)).len();
    assert!(len(b'a') <= len(b'b') && len(b'b') <= len(b'c'));

    let mut bits: Vec<bool> = Vec::new();
    Encoder::new(&table).encode(input, &mut bits).unwrap();
    let output = decode(&mut BitCursor::new(&bits), &tree).unwrap();
    assert_eq!(output, input);
}
