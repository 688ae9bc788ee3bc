//! Cache prefetch hint used by the prefetching lookup path.
//!
//! Only x86_64 and aarch64 expose a prefetch instruction here. On every
//! other target [`prefetch_read`] is a no-op, which leaves query results
//! untouched and only changes latency.

/// Whether [`prefetch_read`] emits an actual prefetch on this target.
pub const SUPPORTED: bool =
    cfg!(any(target_arch = "x86_64", target_arch = "aarch64"));

/// Asks the memory subsystem to start loading the cache line holding
/// `byte`, for reading, with low temporal locality (L2 and outward).
#[inline(always)]
pub fn prefetch_read(byte: &u8) {
    #[cfg(target_arch = "x86_64")]
    {
        use core::arch::x86_64::{_MM_HINT_T2, _mm_prefetch};
        // SAFETY: prefetch never faults and the pointer comes from a live
        // reference; SSE is part of the x86_64 baseline.
        unsafe {
            _mm_prefetch::<{ _MM_HINT_T2 }>(byte as *const u8 as *const i8)
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        // SAFETY: `prfm` is a hint, does not write memory and never faults.
        unsafe {
            core::arch::asm!(
                "prfm pldl2keep, [{addr}]",
                addr = in(reg) byte as *const u8,
                options(nostack, readonly, preserves_flags),
            );
        }
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        let _ = byte;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefetch_does_not_change_memory() {
        let buffer = vec![0xA5u8; 4096];
        for byte in buffer.iter().step_by(64) {
            prefetch_read(byte);
        }
        assert!(buffer.iter().all(|&b| b == 0xA5));
    }

    #[test]
    fn test_supported_matches_target() {
        let expected =
            cfg!(target_arch = "x86_64") || cfg!(target_arch = "aarch64");
        assert_eq!(SUPPORTED, expected);
    }
}
