use fnv_bloom::{BloomFilter, QueryStrategy};
use proptest::prelude::*;

fn keys() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..24), 0..200)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn lookup_paths_agree(
        inserted in keys(),
        queried in keys(),
        fpr in prop::sample::select(vec![0.3, 0.05, 0.01, 1e-6]),
    ) {
        // small capacity so the filter saturates and false positives show up
        let mut filter = BloomFilter::new(64, fpr).unwrap();
        for key in &inserted {
            filter.insert(key);
        }

        for key in inserted.iter().chain(queried.iter()) {
            let expected = filter.contains(key);
            prop_assert_eq!(filter.contains_precomputed(key), expected);
            prop_assert_eq!(filter.contains_with_prefetch(key), expected);
            prop_assert_eq!(filter.query(QueryStrategy::Prefetch, key), expected);
        }
    }

    #[test]
    fn no_false_negatives(inserted in keys()) {
        let mut filter = BloomFilter::new(inserted.len().max(1), 0.01).unwrap();
        for key in &inserted {
            filter.insert(key);
        }
        for key in &inserted {
            prop_assert!(filter.contains(key));
            prop_assert!(filter.contains_with_prefetch(key));
        }
    }

    #[test]
    fn insert_is_idempotent(inserted in keys()) {
        let mut once = BloomFilter::new(256, 0.01).unwrap();
        for key in &inserted {
            once.insert(key);
        }
        let mut twice = once.clone();
        for key in &inserted {
            twice.insert(key);
        }
        prop_assert_eq!(once.bits(), twice.bits());
    }
}
