use fnv::FnvHasher;
use fnv_bloom::{FNV_OFFSET_BASIS, hash_fnv64, probe_indices, split_hash};
use proptest::prelude::*;
use std::hash::Hasher;

fn reference_fnv(bytes: &[u8]) -> u64 {
    let mut hasher = FnvHasher::default();
    hasher.write(bytes);
    hasher.finish()
}

#[test]
fn test_golden_values() {
    let cases: [(&[u8], u64); 5] = [
        (b"abc", 0xe71fa2190541574b),
        (b"", FNV_OFFSET_BASIS),
        (b"\n", 0xaf63c74c8601c8dd),
        (b"whatever", 0xac4f78a0c8e3b44f),
        (b"12.123.1.1", 0xfb350e55c291b178),
    ];
    for (input, expected) in cases {
        assert_eq!(hash_fnv64(input), expected);
        assert_eq!(reference_fnv(input), expected);
    }
}

#[test]
fn test_str_and_bytes_hash_alike() {
    let owned = String::from("whatever");
    assert_eq!(hash_fnv64(owned.as_bytes()), hash_fnv64(b"whatever"));
    assert_eq!(hash_fnv64(&owned.clone().into_bytes()), hash_fnv64(b"whatever"));
}

proptest! {
    #[test]
    fn agrees_with_fnv_crate(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(hash_fnv64(&bytes), reference_fnv(&bytes));
    }

    #[test]
    fn halves_recombine(hash in any::<u64>()) {
        let (h1, h2) = split_hash(hash);
        prop_assert_eq!(h1 | h2, hash);
        prop_assert_eq!(h1 & h2, 0);
        prop_assert!(h1 <= u32::MAX as u64);
        prop_assert_eq!(h2 & 0xFFFF_FFFF, 0);
    }

    #[test]
    fn probes_stay_in_range(
        key in prop::collection::vec(any::<u8>(), 0..64),
        k in 1usize..40,
        m in 1usize..100_000,
    ) {
        let probes: Vec<usize> = probe_indices(&key, k, m).collect();
        prop_assert_eq!(probes.len(), k);
        prop_assert!(probes.iter().all(|&ix| ix < m));
        // recomputing yields the same positions
        let again: Vec<usize> = probe_indices(&key, k, m).collect();
        prop_assert_eq!(probes, again);
    }
}
