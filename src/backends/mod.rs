//! LEA processing backends and the dispatcher that binds one to a context.

use crate::lea::{RoundKeys, BLOCK_SIZE};
use cfg_if::cfg_if;

pub(crate) mod soft;

cfg_if! {
    if #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(krypto_force_soft)))] {
        pub(crate) mod simd;

        cpufeatures::new!(avx2_cpuid, "avx2");
        cpufeatures::new!(sse2_cpuid, "sse2");
    }
}

/// A concrete LEA block-processing strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Portable scalar code, one block at a time.
    Soft,
    /// SSE2, four blocks per call.
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(krypto_force_soft)))]
    Sse2,
    /// AVX2, eight blocks per call.
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(krypto_force_soft)))]
    Avx2,
}

impl Backend {
    /// Picks the widest backend the running CPU supports.
    ///
    /// `cpufeatures` caches the probe result process-wide, so only the first
    /// call pays for `cpuid`.
    pub fn detect() -> Self {
        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(krypto_force_soft)))]
        {
            if avx2_cpuid::get() {
                return Backend::Avx2;
            }
            if sse2_cpuid::get() {
                return Backend::Sse2;
            }
        }
        Backend::Soft
    }

    /// Smallest number of blocks the backend's wide routine handles in one go.
    pub const fn min_blocks(self) -> usize {
        match self {
            Backend::Soft => 1,
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(krypto_force_soft)))]
            Backend::Sse2 => simd::SSE2_BLOCKS,
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(krypto_force_soft)))]
            Backend::Avx2 => simd::AVX2_BLOCKS,
        }
    }
}

/// Whether an accelerated LEA backend can be selected on this CPU.
pub fn simd_available() -> bool {
    Backend::detect() != Backend::Soft
}

/// Encrypts every block of `buf` in place. `buf.len()` must be a multiple
/// of the block size.
pub(crate) fn encrypt_blocks(backend: Backend, rk: &RoundKeys, buf: &mut [u8]) {
    debug_assert_eq!(buf.len() % BLOCK_SIZE, 0);
    let done = match backend {
        Backend::Soft => 0,
        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(krypto_force_soft)))]
        Backend::Sse2 => {
            // SAFETY: the Sse2 backend is only bound after a positive sse2 probe.
            unsafe { simd::encrypt_sse2(rk, buf) }
        }
        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(krypto_force_soft)))]
        Backend::Avx2 => {
            // SAFETY: the Avx2 backend is only bound after a positive avx2 probe.
            unsafe { simd::encrypt_avx2(rk, buf) }
        }
    };
    for block in buf[done..].chunks_exact_mut(BLOCK_SIZE) {
        soft::encrypt_block(rk, block);
    }
}

/// Decrypts every block of `buf` in place. `buf.len()` must be a multiple
/// of the block size.
pub(crate) fn decrypt_blocks(backend: Backend, rk: &RoundKeys, buf: &mut [u8]) {
    debug_assert_eq!(buf.len() % BLOCK_SIZE, 0);
    let done = match backend {
        Backend::Soft => 0,
        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(krypto_force_soft)))]
        Backend::Sse2 => {
            // SAFETY: see `encrypt_blocks`.
            unsafe { simd::decrypt_sse2(rk, buf) }
        }
        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(krypto_force_soft)))]
        Backend::Avx2 => {
            // SAFETY: see `encrypt_blocks`.
            unsafe { simd::decrypt_avx2(rk, buf) }
        }
    };
    for block in buf[done..].chunks_exact_mut(BLOCK_SIZE) {
        soft::decrypt_block(rk, block);
    }
}
