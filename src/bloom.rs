//! Standard Bloom Filter implementation
pub mod config;
pub mod filter;
pub mod query;

pub use config::{
    BloomFilterConfig, BloomFilterConfigBuilder, BloomFilterConfigBuilderError,
    BloomParams,
};
pub use filter::BloomFilter;
pub use query::QueryStrategy;
