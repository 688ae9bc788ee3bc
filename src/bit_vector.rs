use crate::error::{BloomError, BloomResult};
use bitvec::{order::Lsb0, vec::BitVec};

/// Fixed-size packed array of bits. Bit `ix` lives at bit `ix % 8` of
/// byte `ix / 8`.
///
/// The plain accessors (`set_bit`, `clear_bit`, `read_bit`) expect the
/// caller to keep `ix < len()` and panic otherwise. The `try_*` variants
/// check the bound and report [`BloomError::IndexOutOfBounds`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitVector {
    bits: BitVec<u8, Lsb0>,
}

impl BitVector {
    /// Creates a zeroed vector of at least `size` bits. The size is
    /// rounded up to the next multiple of 8.
    pub fn new(size: usize) -> BloomResult<Self> {
        let size = size
            .checked_add(7)
            .map(|s| s & !7)
            .ok_or_else(|| {
                BloomError::InvalidConfig(format!(
                    "Bit vector size {size} overflows"
                ))
            })?;
        let bytes = size / 8;

        let mut storage: Vec<u8> = Vec::new();
        storage
            .try_reserve_exact(bytes)
            .map_err(|_| BloomError::AllocationFailed { bytes })?;
        storage.resize(bytes, 0);

        let bits = BitVec::try_from_vec(storage).map_err(|_| {
            BloomError::InvalidConfig(format!(
                "Bit vector size {size} exceeds addressable bits"
            ))
        })?;
        Ok(Self { bits })
    }

    #[inline]
    pub fn set_bit(&mut self, ix: usize) {
        self.bits.set(ix, true);
    }

    #[inline]
    pub fn clear_bit(&mut self, ix: usize) {
        self.bits.set(ix, false);
    }

    #[inline]
    pub fn read_bit(&self, ix: usize) -> bool {
        self.bits[ix]
    }

    pub fn try_set_bit(&mut self, ix: usize) -> BloomResult<()> {
        self.check_bounds(ix)?;
        self.set_bit(ix);
        Ok(())
    }

    pub fn try_clear_bit(&mut self, ix: usize) -> BloomResult<()> {
        self.check_bounds(ix)?;
        self.clear_bit(ix);
        Ok(())
    }

    pub fn try_read_bit(&self, ix: usize) -> BloomResult<bool> {
        self.check_bounds(ix)?;
        Ok(self.read_bit(ix))
    }

    /// Capacity in bits, always a multiple of 8.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Size of the backing buffer in bytes.
    pub fn byte_len(&self) -> usize {
        self.bits.as_raw_slice().len()
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Backing bytes, `len() / 8` of them.
    pub fn as_raw_slice(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    fn check_bounds(&self, ix: usize) -> BloomResult<()> {
        if ix >= self.len() {
            return Err(BloomError::IndexOutOfBounds {
                index: ix,
                capacity: self.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_rounds_up_to_byte() {
        assert_eq!(BitVector::new(0).unwrap().len(), 0);
        assert_eq!(BitVector::new(1).unwrap().len(), 8);
        assert_eq!(BitVector::new(8).unwrap().len(), 8);
        assert_eq!(BitVector::new(9586).unwrap().len(), 9592);
        assert_eq!(BitVector::new(9586).unwrap().byte_len(), 1199);
    }

    #[test]
    fn test_byte_layout_is_lsb_first() {
        let mut bv = BitVector::new(16).unwrap();
        bv.set_bit(0);
        bv.set_bit(9);
        bv.set_bit(15);
        assert_eq!(bv.as_raw_slice(), &[0b0000_0001, 0b1000_0010]);

        bv.clear_bit(15);
        assert_eq!(bv.as_raw_slice(), &[0b0000_0001, 0b0000_0010]);
    }

    #[test]
    fn test_set_clear_read() {
        let mut bv = BitVector::new(100).unwrap();
        assert!(!bv.read_bit(42));
        bv.set_bit(42);
        assert!(bv.read_bit(42));
        bv.set_bit(42);
        assert_eq!(bv.count_ones(), 1);
        bv.clear_bit(42);
        assert!(!bv.read_bit(42));
        assert_eq!(bv.count_ones(), 0);
    }

    #[test]
    fn test_checked_accessors() {
        let mut bv = BitVector::new(10).unwrap();
        // rounded up, so 15 is still valid
        assert!(bv.try_set_bit(15).is_ok());
        assert!(bv.try_read_bit(15).unwrap());

        match bv.try_read_bit(16) {
            Err(BloomError::IndexOutOfBounds { index, capacity }) => {
                assert_eq!(index, 16);
                assert_eq!(capacity, 16);
            }
            other => panic!("Expected IndexOutOfBounds, got {other:?}"),
        }
        assert!(bv.try_clear_bit(16).is_err());
        assert!(bv.try_clear_bit(15).is_ok());
        assert!(!bv.read_bit(15));
    }

    #[test]
    #[should_panic]
    fn test_unchecked_read_out_of_range_panics() {
        let bv = BitVector::new(8).unwrap();
        bv.read_bit(8);
    }

    #[test]
    fn test_overflowing_size_is_rejected() {
        assert!(matches!(
            BitVector::new(usize::MAX),
            Err(BloomError::InvalidConfig(_))
        ));
    }
}
