use std::fmt;

/// Lookup path used by [`BloomFilter::query`](super::BloomFilter::query).
///
/// `Sequential`, `Precomputed` and `Prefetch` always agree on the answer.
/// `Pseudo` and `Idle` are timing baselines that touch memory `k` times
/// and report membership unconditionally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum QueryStrategy {
    /// Compute each probe and test it immediately, stop at the first zero
    #[default]
    Sequential,
    /// Compute all probes first, then test them in order
    Precomputed,
    /// Like `Precomputed`, with a prefetch hint per probe before testing
    Prefetch,
    /// Hash the key, then load a fixed byte `k` times
    Pseudo,
    /// Load a fixed byte `k` times without hashing
    Idle,
}

impl QueryStrategy {
    pub const ALL: [QueryStrategy; 5] = [
        QueryStrategy::Sequential,
        QueryStrategy::Precomputed,
        QueryStrategy::Prefetch,
        QueryStrategy::Pseudo,
        QueryStrategy::Idle,
    ];

    /// Whether the strategy answers membership, as opposed to being a
    /// fixed-cost baseline.
    pub fn is_exact(self) -> bool {
        matches!(self, Self::Sequential | Self::Precomputed | Self::Prefetch)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Precomputed => "precomputed",
            Self::Prefetch => "prefetch",
            Self::Pseudo => "pseudo",
            Self::Idle => "idle",
        }
    }
}

impl fmt::Display for QueryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
