//! 64-bit Fowler-Noll-Vo (FNV-1a) string hash and the double hashing
//! scheme that turns one hash into `k` probe positions.
//!
//! <https://en.wikipedia.org/wiki/Fowler%E2%80%93Noll%E2%80%93Vo_hash_function>

pub const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
pub const FNV_PRIME: u64 = 0x100000001b3;

const LOW_HALF: u64 = 0x0000_0000_FFFF_FFFF;
const HIGH_HALF: u64 = 0xFFFF_FFFF_0000_0000;

/// FNV-1a over exactly the bytes of `key`. The empty key hashes to
/// [`FNV_OFFSET_BASIS`].
pub const fn hash_fnv64(key: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < key.len() {
        hash ^= key[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Splits a 64-bit hash into `(h1, h2)`. Neither half is shifted: `h1`
/// keeps the low 32 bits, `h2` keeps the high 32 bits in place.
#[inline]
pub fn split_hash(hash: u64) -> (u64, u64) {
    (hash & LOW_HALF, hash & HIGH_HALF)
}

/// Kirsch-Mitzenmacher probe `i`: `(h1 + i * h2) mod m`, with the sum and
/// product wrapping at 2^64.
#[inline]
pub fn probe_index(h1: u64, h2: u64, i: usize, m: usize) -> usize {
    (h1.wrapping_add((i as u64).wrapping_mul(h2)) % m as u64) as usize
}

/// Iterator over the `num_hashes` probe positions for `key` in a bit
/// vector of `m` bits. Positions are always in `[0, m)`.
pub fn probe_indices(
    key: &[u8],
    num_hashes: usize,
    m: usize,
) -> impl Iterator<Item = usize> {
    let (h1, h2) = split_hash(hash_fnv64(key));
    (0..num_hashes).map(move |i| probe_index(h1, h2, i, m))
}

pub fn optimal_bit_vector_size(n: usize, fpr: f64) -> f64 {
    let ln2 = std::f64::consts::LN_2;
    ((-(n as f64) * fpr.ln()) / (ln2 * ln2)).ceil()
}

pub fn optimal_num_hashes(n: usize, m: usize) -> usize {
    ((m as f64 / n as f64) * std::f64::consts::LN_2).ceil() as usize
}

/// Bit count needed to reach `fpr` for `n` elements when the number of
/// hash functions is pinned to `k` instead of derived.
pub fn bit_vector_size_for_hashes(n: usize, fpr: f64, k: usize) -> f64 {
    let k = k as f64;
    (-(k * n as f64) / (1.0 - fpr.powf(1.0 / k)).ln()).ceil()
}
