use crate::error::{BloomError, BloomResult};
use crate::hash::{
    bit_vector_size_for_hashes, optimal_bit_vector_size, optimal_num_hashes,
};
use derive_builder::Builder;

#[derive(Clone, Debug, Builder)]
#[builder(pattern = "owned")]
pub struct BloomFilterConfig {
    /// Expected number of distinct elements, used only for sizing
    #[builder(default = "1_000_000")]
    pub capacity: usize,

    /// Target false positive rate (0.0 to 1.0, exclusive)
    #[builder(default = "0.01")]
    pub false_positive_rate: f64,

    /// Fixed number of hash functions. When unset the optimal count is
    /// derived from the bit vector size.
    #[builder(default = "None", setter(strip_option))]
    pub num_hashes: Option<usize>,
}

impl BloomFilterConfig {
    pub fn validate(&self) -> BloomResult<()> {
        if self.capacity == 0 {
            return Err(BloomError::ZeroCapacity);
        }
        // written as a negated range check so NaN is rejected too
        if !(self.false_positive_rate > 0.0 && self.false_positive_rate < 1.0)
        {
            return Err(BloomError::InvalidFalsePositiveRate {
                rate: self.false_positive_rate,
            });
        }
        if self.num_hashes == Some(0) {
            return Err(BloomError::InvalidConfig(
                "Number of hash functions must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Derived parameters calculated from BloomFilterConfig
///
/// `bit_vector_size` is the unrounded `m`; the bit vector built from it
/// rounds up to a whole number of bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomParams {
    pub bit_vector_size: usize,
    pub num_hashes: usize,
}

impl TryFrom<&BloomFilterConfig> for BloomParams {
    type Error = BloomError;

    fn try_from(config: &BloomFilterConfig) -> BloomResult<Self> {
        config.validate()?;

        let n = config.capacity;
        let fpr = config.false_positive_rate;
        let bits = match config.num_hashes {
            Some(k) => bit_vector_size_for_hashes(n, fpr, k),
            None => optimal_bit_vector_size(n, fpr),
        };
        if !bits.is_finite() || bits < 1.0 || bits >= usize::MAX as f64 {
            return Err(BloomError::InvalidConfig(format!(
                "Bit vector size {bits} for capacity {n} and rate {fpr} is not representable"
            )));
        }
        let bit_vector_size = bits as usize;
        let num_hashes = config
            .num_hashes
            .unwrap_or_else(|| optimal_num_hashes(n, bit_vector_size));

        Ok(Self {
            bit_vector_size,
            num_hashes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(capacity: usize, fpr: f64) -> BloomFilterConfig {
        BloomFilterConfigBuilder::default()
            .capacity(capacity)
            .false_positive_rate(fpr)
            .build()
            .expect("Failed to build config")
    }

    #[test]
    fn test_builder_defaults() {
        let config = BloomFilterConfigBuilder::default().build().unwrap();
        assert_eq!(config.capacity, 1_000_000);
        assert_eq!(config.false_positive_rate, 0.01);
        assert_eq!(config.num_hashes, None);
    }

    #[test]
    fn test_params_for_thousand_elements() {
        let params = BloomParams::try_from(&config(1000, 0.01)).unwrap();
        assert_eq!(params.bit_vector_size, 9586);
        assert_eq!(params.num_hashes, 7);
    }

    #[test]
    fn test_pinned_hash_count() {
        let config = BloomFilterConfigBuilder::default()
            .capacity(1000)
            .false_positive_rate(0.01)
            .num_hashes(2)
            .build()
            .unwrap();
        let params = BloomParams::try_from(&config).unwrap();
        assert_eq!(params.num_hashes, 2);
        assert_eq!(params.bit_vector_size, 18983);
    }

    #[test]
    fn test_invalid_rates() {
        for rate in [0.0, 1.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            match config(1000, rate).validate() {
                Err(BloomError::InvalidFalsePositiveRate { .. }) => {}
                other => panic!("rate {rate} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_zero_capacity() {
        assert!(matches!(
            config(0, 0.01).validate(),
            Err(BloomError::ZeroCapacity)
        ));
    }

    #[test]
    fn test_zero_hashes() {
        let config = BloomFilterConfigBuilder::default()
            .num_hashes(0)
            .build()
            .unwrap();
        assert!(matches!(
            BloomParams::try_from(&config),
            Err(BloomError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unrepresentable_size() {
        let result = BloomParams::try_from(&config(usize::MAX, 1e-300));
        assert!(matches!(result, Err(BloomError::InvalidConfig(_))));
    }
}
