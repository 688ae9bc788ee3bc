use super::{
    BloomFilterConfig, BloomFilterConfigBuilder, BloomParams, QueryStrategy,
};
use crate::bit_vector::BitVector;
use crate::common::bytes2hr;
use crate::error::{BloomError, BloomResult};
use crate::hash::{hash_fnv64, probe_indices, split_hash};
use crate::prefetch::prefetch_read;
use std::fmt;
use std::hint::black_box;
use tracing::debug;

/// Probe buffers up to this many entries live on the stack.
const STACK_PROBES: usize = 32;

/// Byte loaded by the baseline query paths.
const FIXED_LOOKUP: usize = 0;

/// Classic Bloom filter over a packed bit vector.
///
/// Sized once from `(capacity, false_positive_rate)`; `m` and `k` never
/// change afterwards. Keys are hashed with 64-bit FNV-1a and the `k` probe
/// positions come from double hashing `(h1 + i * h2) mod m`.
#[derive(Clone)]
pub struct BloomFilter {
    config: BloomFilterConfig,
    num_hashes: usize,
    bits: BitVector,
}

impl BloomFilter {
    /// Filter for `capacity` expected elements at the given target false
    /// positive rate.
    pub fn new(capacity: usize, false_positive_rate: f64) -> BloomResult<Self> {
        let config = BloomFilterConfigBuilder::default()
            .capacity(capacity)
            .false_positive_rate(false_positive_rate)
            .build()
            .map_err(|e| BloomError::InvalidConfig(e.to_string()))?;
        Self::from_config(config)
    }

    pub fn from_config(config: BloomFilterConfig) -> BloomResult<Self> {
        let params = BloomParams::try_from(&config)?;
        let bits = BitVector::new(params.bit_vector_size)?;

        debug!(
            capacity = config.capacity,
            false_positive_rate = config.false_positive_rate,
            bit_vector_size = bits.len(),
            num_hashes = params.num_hashes,
            "created bloom filter"
        );

        Ok(Self {
            config,
            num_hashes: params.num_hashes,
            bits,
        })
    }

    pub fn insert(&mut self, item: &[u8]) {
        let m = self.bits.len();
        for ix in probe_indices(item, self.num_hashes, m) {
            self.bits.set_bit(ix);
        }
    }

    /// Membership test that reads each probe as soon as it is computed and
    /// returns on the first unset bit.
    pub fn contains(&self, item: &[u8]) -> bool {
        let m = self.bits.len();
        probe_indices(item, self.num_hashes, m)
            .all(|ix| self.bits.read_bit(ix))
    }

    /// Same answer as [`contains`](Self::contains), but all probe positions
    /// are computed before the first bit is read.
    pub fn contains_precomputed(&self, item: &[u8]) -> bool {
        self.with_probes(item, |probes| {
            probes.iter().all(|&ix| self.bits.read_bit(ix))
        })
    }

    /// Same answer as [`contains`](Self::contains). After computing all
    /// probe positions, a prefetch is issued for the byte behind each one
    /// before any of them is read.
    pub fn contains_with_prefetch(&self, item: &[u8]) -> bool {
        self.with_probes(item, |probes| {
            let raw = self.bits.as_raw_slice();
            for &ix in probes {
                prefetch_read(&raw[ix / 8]);
            }
            probes.iter().all(|&ix| self.bits.read_bit(ix))
        })
    }

    /// Timing baseline: hashes the key like a real query, then loads a
    /// fixed byte `k` times. Always reports membership.
    pub fn contains_pseudo(&self, item: &[u8]) -> bool {
        black_box(split_hash(hash_fnv64(item)));
        self.touch_fixed();
        true
    }

    /// Timing baseline without hashing: loads a fixed byte `k` times.
    /// Always reports membership.
    pub fn contains_idle(&self) -> bool {
        self.touch_fixed();
        true
    }

    pub fn query(&self, strategy: QueryStrategy, item: &[u8]) -> bool {
        match strategy {
            QueryStrategy::Sequential => self.contains(item),
            QueryStrategy::Precomputed => self.contains_precomputed(item),
            QueryStrategy::Prefetch => self.contains_with_prefetch(item),
            QueryStrategy::Pseudo => self.contains_pseudo(item),
            QueryStrategy::Idle => self.contains_idle(),
        }
    }

    fn with_probes<R>(
        &self,
        item: &[u8],
        f: impl FnOnce(&[usize]) -> R,
    ) -> R {
        let m = self.bits.len();
        let probes = probe_indices(item, self.num_hashes, m);
        if self.num_hashes <= STACK_PROBES {
            let mut buf = [0usize; STACK_PROBES];
            for (slot, ix) in buf.iter_mut().zip(probes) {
                *slot = ix;
            }
            f(&buf[..self.num_hashes])
        } else {
            let buf: Vec<usize> = probes.collect();
            f(&buf)
        }
    }

    fn touch_fixed(&self) {
        if let Some(byte) = self.bits.as_raw_slice().get(FIXED_LOOKUP) {
            for _ in 0..self.num_hashes {
                black_box(*black_box(byte));
            }
        }
    }

    pub fn config(&self) -> &BloomFilterConfig {
        &self.config
    }

    /// Target element count the filter was sized for.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn false_positive_rate(&self) -> f64 {
        self.config.false_positive_rate
    }

    /// `k`
    pub fn num_hashes(&self) -> usize {
        self.num_hashes
    }

    /// `m`, the probe modulus, rounded up to a multiple of 8.
    pub fn bit_vector_size(&self) -> usize {
        self.bits.len()
    }

    pub fn bits(&self) -> &BitVector {
        &self.bits
    }

    pub fn memory_bytes(&self) -> usize {
        self.bits.byte_len()
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Fraction of bits set, in `[0, 1]`.
    pub fn fill_ratio(&self) -> f64 {
        self.count_ones() as f64 / self.bits.len() as f64
    }

    /// False positive rate implied by the current fill: `fill_ratio ^ k`.
    pub fn estimated_false_positive_rate(&self) -> f64 {
        self.fill_ratio().powi(self.num_hashes as i32)
    }
}

impl fmt::Debug for BloomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BloomFilter {{ capacity: {}, false_positive_rate: {}, num_hashes: {}, bit_vector_size: {}, count_ones: {} }}",
            self.config.capacity,
            self.config.false_positive_rate,
            self.num_hashes,
            self.bits.len(),
            self.count_ones()
        )
    }
}

impl fmt::Display for BloomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bloom filter:")?;
        writeln!(f, "  target num elements: {}", self.config.capacity)?;
        writeln!(
            f,
            "  target false positive rate: {}",
            self.config.false_positive_rate
        )?;
        writeln!(f, "  num hash functions: {}", self.num_hashes)?;
        writeln!(f, "  bit vector size: {} bits", self.bits.len())?;
        writeln!(f, "  memory: {}", bytes2hr(self.memory_bytes()))?;
        write!(f, "  fill: {:.2}%", self.fill_ratio() * 100.0)
    }
}
