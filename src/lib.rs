//! Bloom filter over a packed bit vector, keyed by 64-bit FNV-1a.
//!
//! HowTo:
//!    * Sizing: for `n` expected elements and target false positive rate
//!      `p`, the bit vector gets `m = ceil(-n ln p / (ln 2)^2)` bits
//!      (rounded up to whole bytes) and `k = ceil(m ln 2 / n)` probes.
//!    * Hashing: one FNV-1a hash per key is split into `h1` (low 32 bits)
//!      and `h2` (high 32 bits, not shifted). Probe `i` lands on
//!      `(h1 + i * h2) mod m` with wrapping 64-bit arithmetic.
//!
//! Insertion:
//!     * Set all `k` probed bits. Bits are never cleared, so inserting a key
//!       twice leaves the filter unchanged.
//! Query:
//!     * `contains` stops at the first unset probe.
//!     * `contains_precomputed` computes all probes before reading any.
//!     * `contains_with_prefetch` additionally issues a cache prefetch for
//!       every probe before reading. All three always agree.
//!     * `contains_pseudo` / `contains_idle` are fixed-cost baselines for
//!       benchmarks and always answer `true`.
//!
//! Obvious problems:
//!     * No deletion, no resizing and no internal locking.
//!     * `h2` is not shifted down, so every `i * h2` is a multiple of 2^32.
//!       When `m` divides 2^32 all probes collapse onto `h1 mod m`.
//!
//! ```
//! use fnv_bloom::BloomFilter;
//!
//! let mut filter = BloomFilter::new(1000, 0.01).unwrap();
//! filter.insert(b"12.123.1.1");
//! assert!(filter.contains(b"12.123.1.1"));
//! assert_eq!(
//!     filter.contains(b"1.2.3.4"),
//!     filter.contains_with_prefetch(b"1.2.3.4")
//! );
//! ```

mod bit_vector;
pub mod bloom;
pub mod common;
mod error;
mod hash;
pub mod keys;
pub mod prefetch;

pub use bit_vector::BitVector;
pub use bloom::{
    BloomFilter, BloomFilterConfig, BloomFilterConfigBuilder,
    BloomFilterConfigBuilderError, BloomParams, QueryStrategy,
};
pub use error::{BloomError, BloomResult};
pub use hash::{
    FNV_OFFSET_BASIS, FNV_PRIME, bit_vector_size_for_hashes, hash_fnv64,
    optimal_bit_vector_size, optimal_num_hashes, probe_index, probe_indices,
    split_hash,
};
