//! SSE2 and AVX2 LEA backends.
//!
//! Both kernels transpose a batch of blocks so that each vector holds the
//! same state word of every block, then run the scalar round structure
//! lane-wise with broadcast round keys.

use crate::lea::{RoundKeys, BLOCK_SIZE};
use cipher::{
    consts::{U16, U4, U8},
    inout::InOut,
    Block, BlockBackend, BlockSizeUser, ParBlocks, ParBlocksSizeUser,
};

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

pub(crate) const SSE2_BLOCKS: usize = 4;
pub(crate) const AVX2_BLOCKS: usize = 8;

const SSE2_BYTES: usize = SSE2_BLOCKS * BLOCK_SIZE;
const AVX2_BYTES: usize = AVX2_BLOCKS * BLOCK_SIZE;

// --- SSE2 ---

macro_rules! rol128 {
    ($x:expr, $l:literal, $r:literal) => {
        _mm_or_si128(_mm_slli_epi32::<$l>($x), _mm_srli_epi32::<$r>($x))
    };
}

/// 4x4 word transpose. It is its own inverse.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn transpose4(x: [__m128i; 4]) -> [__m128i; 4] {
    let t0 = _mm_unpacklo_epi32(x[0], x[1]);
    let t1 = _mm_unpacklo_epi32(x[2], x[3]);
    let t2 = _mm_unpackhi_epi32(x[0], x[1]);
    let t3 = _mm_unpackhi_epi32(x[2], x[3]);
    [
        _mm_unpacklo_epi64(t0, t1),
        _mm_unpackhi_epi64(t0, t1),
        _mm_unpacklo_epi64(t2, t3),
        _mm_unpackhi_epi64(t2, t3),
    ]
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn splat4(k: &[u32; 6]) -> [__m128i; 6] {
    [
        _mm_set1_epi32(k[0] as i32),
        _mm_set1_epi32(k[1] as i32),
        _mm_set1_epi32(k[2] as i32),
        _mm_set1_epi32(k[3] as i32),
        _mm_set1_epi32(k[4] as i32),
        _mm_set1_epi32(k[5] as i32),
    ]
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn load4(blocks: &[u8; SSE2_BYTES]) -> [__m128i; 4] {
    let p = blocks.as_ptr() as *const __m128i;
    // SAFETY: `blocks` spans exactly four unaligned 16-byte loads.
    unsafe {
        transpose4([
            _mm_loadu_si128(p),
            _mm_loadu_si128(p.add(1)),
            _mm_loadu_si128(p.add(2)),
            _mm_loadu_si128(p.add(3)),
        ])
    }
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn store4(x: [__m128i; 4], blocks: &mut [u8; SSE2_BYTES]) {
    let p = blocks.as_mut_ptr() as *mut __m128i;
    // SAFETY: `blocks` spans exactly four unaligned 16-byte stores.
    unsafe {
        let x = transpose4(x);
        _mm_storeu_si128(p, x[0]);
        _mm_storeu_si128(p.add(1), x[1]);
        _mm_storeu_si128(p.add(2), x[2]);
        _mm_storeu_si128(p.add(3), x[3]);
    }
}

#[target_feature(enable = "sse2")]
unsafe fn encrypt4(rk: &RoundKeys, blocks: &mut [u8; SSE2_BYTES]) {
    // SAFETY: sse2 is enabled for this function.
    unsafe {
        let mut x = load4(blocks);
        for k in rk.as_slice() {
            let k = splat4(k);
            let x0 = _mm_add_epi32(_mm_xor_si128(x[0], k[0]), _mm_xor_si128(x[1], k[1]));
            let x1 = _mm_add_epi32(_mm_xor_si128(x[1], k[2]), _mm_xor_si128(x[2], k[3]));
            let x2 = _mm_add_epi32(_mm_xor_si128(x[2], k[4]), _mm_xor_si128(x[3], k[5]));
            x = [rol128!(x0, 9, 23), rol128!(x1, 27, 5), rol128!(x2, 29, 3), x[0]];
        }
        store4(x, blocks);
    }
}

#[target_feature(enable = "sse2")]
unsafe fn decrypt4(rk: &RoundKeys, blocks: &mut [u8; SSE2_BYTES]) {
    // SAFETY: sse2 is enabled for this function.
    unsafe {
        let mut x = load4(blocks);
        for k in rk.as_slice().iter().rev() {
            let k = splat4(k);
            let x0 = x[3];
            let x1 = _mm_xor_si128(
                _mm_sub_epi32(rol128!(x[0], 23, 9), _mm_xor_si128(x0, k[0])),
                k[1],
            );
            let x2 = _mm_xor_si128(
                _mm_sub_epi32(rol128!(x[1], 5, 27), _mm_xor_si128(x1, k[2])),
                k[3],
            );
            let x3 = _mm_xor_si128(
                _mm_sub_epi32(rol128!(x[2], 3, 29), _mm_xor_si128(x2, k[4])),
                k[5],
            );
            x = [x0, x1, x2, x3];
        }
        store4(x, blocks);
    }
}

/// Encrypts the leading multiple of four blocks of `buf`, returning the
/// number of bytes processed.
///
/// # Safety
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn encrypt_sse2(rk: &RoundKeys, buf: &mut [u8]) -> usize {
    let (chunks, _) = buf.as_chunks_mut::<SSE2_BYTES>();
    for blocks in chunks.iter_mut() {
        // SAFETY: sse2 is enabled for this function.
        unsafe { encrypt4(rk, blocks) };
    }
    chunks.len() * SSE2_BYTES
}

/// Decrypts the leading multiple of four blocks of `buf`, returning the
/// number of bytes processed.
///
/// # Safety
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn decrypt_sse2(rk: &RoundKeys, buf: &mut [u8]) -> usize {
    let (chunks, _) = buf.as_chunks_mut::<SSE2_BYTES>();
    for blocks in chunks.iter_mut() {
        // SAFETY: sse2 is enabled for this function.
        unsafe { decrypt4(rk, blocks) };
    }
    chunks.len() * SSE2_BYTES
}

// --- AVX2 ---

macro_rules! rol256 {
    ($x:expr, $l:literal, $r:literal) => {
        _mm256_or_si256(_mm256_slli_epi32::<$l>($x), _mm256_srli_epi32::<$r>($x))
    };
}

/// Lane-wise 4x4 word transpose over pairs of blocks. The block order inside
/// the transposed vectors is interleaved, but the transform is its own
/// inverse, so loading and storing through it round-trips every block.
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn transpose8(x: [__m256i; 4]) -> [__m256i; 4] {
    let t0 = _mm256_unpacklo_epi32(x[0], x[1]);
    let t1 = _mm256_unpacklo_epi32(x[2], x[3]);
    let t2 = _mm256_unpackhi_epi32(x[0], x[1]);
    let t3 = _mm256_unpackhi_epi32(x[2], x[3]);
    [
        _mm256_unpacklo_epi64(t0, t1),
        _mm256_unpackhi_epi64(t0, t1),
        _mm256_unpacklo_epi64(t2, t3),
        _mm256_unpackhi_epi64(t2, t3),
    ]
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn splat8(k: &[u32; 6]) -> [__m256i; 6] {
    [
        _mm256_set1_epi32(k[0] as i32),
        _mm256_set1_epi32(k[1] as i32),
        _mm256_set1_epi32(k[2] as i32),
        _mm256_set1_epi32(k[3] as i32),
        _mm256_set1_epi32(k[4] as i32),
        _mm256_set1_epi32(k[5] as i32),
    ]
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn load8(blocks: &[u8; AVX2_BYTES]) -> [__m256i; 4] {
    let p = blocks.as_ptr() as *const __m256i;
    // SAFETY: `blocks` spans exactly four unaligned 32-byte loads.
    unsafe {
        transpose8([
            _mm256_loadu_si256(p),
            _mm256_loadu_si256(p.add(1)),
            _mm256_loadu_si256(p.add(2)),
            _mm256_loadu_si256(p.add(3)),
        ])
    }
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn store8(x: [__m256i; 4], blocks: &mut [u8; AVX2_BYTES]) {
    let p = blocks.as_mut_ptr() as *mut __m256i;
    // SAFETY: `blocks` spans exactly four unaligned 32-byte stores.
    unsafe {
        let x = transpose8(x);
        _mm256_storeu_si256(p, x[0]);
        _mm256_storeu_si256(p.add(1), x[1]);
        _mm256_storeu_si256(p.add(2), x[2]);
        _mm256_storeu_si256(p.add(3), x[3]);
    }
}

#[target_feature(enable = "avx2")]
unsafe fn encrypt8(rk: &RoundKeys, blocks: &mut [u8; AVX2_BYTES]) {
    // SAFETY: avx2 is enabled for this function.
    unsafe {
        let mut x = load8(blocks);
        for k in rk.as_slice() {
            let k = splat8(k);
            let x0 = _mm256_add_epi32(_mm256_xor_si256(x[0], k[0]), _mm256_xor_si256(x[1], k[1]));
            let x1 = _mm256_add_epi32(_mm256_xor_si256(x[1], k[2]), _mm256_xor_si256(x[2], k[3]));
            let x2 = _mm256_add_epi32(_mm256_xor_si256(x[2], k[4]), _mm256_xor_si256(x[3], k[5]));
            x = [rol256!(x0, 9, 23), rol256!(x1, 27, 5), rol256!(x2, 29, 3), x[0]];
        }
        store8(x, blocks);
    }
}

#[target_feature(enable = "avx2")]
unsafe fn decrypt8(rk: &RoundKeys, blocks: &mut [u8; AVX2_BYTES]) {
    // SAFETY: avx2 is enabled for this function.
    unsafe {
        let mut x = load8(blocks);
        for k in rk.as_slice().iter().rev() {
            let k = splat8(k);
            let x0 = x[3];
            let x1 = _mm256_xor_si256(
                _mm256_sub_epi32(rol256!(x[0], 23, 9), _mm256_xor_si256(x0, k[0])),
                k[1],
            );
            let x2 = _mm256_xor_si256(
                _mm256_sub_epi32(rol256!(x[1], 5, 27), _mm256_xor_si256(x1, k[2])),
                k[3],
            );
            let x3 = _mm256_xor_si256(
                _mm256_sub_epi32(rol256!(x[2], 3, 29), _mm256_xor_si256(x2, k[4])),
                k[5],
            );
            x = [x0, x1, x2, x3];
        }
        store8(x, blocks);
    }
}

/// Encrypts eight-block chunks with AVX2, then a remaining four-block chunk
/// with SSE2. Returns the number of bytes processed.
///
/// # Safety
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn encrypt_avx2(rk: &RoundKeys, buf: &mut [u8]) -> usize {
    let (chunks, _) = buf.as_chunks_mut::<AVX2_BYTES>();
    for blocks in chunks.iter_mut() {
        // SAFETY: avx2 is enabled for this function.
        unsafe { encrypt8(rk, blocks) };
    }
    let done = chunks.len() * AVX2_BYTES;
    // SAFETY: every AVX2 CPU supports SSE2.
    done + unsafe { encrypt_sse2(rk, &mut buf[done..]) }
}

/// Decrypts eight-block chunks with AVX2, then a remaining four-block chunk
/// with SSE2. Returns the number of bytes processed.
///
/// # Safety
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn decrypt_avx2(rk: &RoundKeys, buf: &mut [u8]) -> usize {
    let (chunks, _) = buf.as_chunks_mut::<AVX2_BYTES>();
    for blocks in chunks.iter_mut() {
        // SAFETY: avx2 is enabled for this function.
        unsafe { decrypt8(rk, blocks) };
    }
    let done = chunks.len() * AVX2_BYTES;
    // SAFETY: every AVX2 CPU supports SSE2.
    done + unsafe { decrypt_sse2(rk, &mut buf[done..]) }
}

// --- `cipher` trait backends ---

macro_rules! simd_backend {
    ($name:ident, $par:ty, $bytes:expr, $par_fn:ident, $block_fn:path) => {
        pub(crate) struct $name<'a>(pub(crate) &'a RoundKeys);

        impl BlockSizeUser for $name<'_> {
            type BlockSize = U16;
        }

        impl ParBlocksSizeUser for $name<'_> {
            type ParBlocksSize = $par;
        }

        impl BlockBackend for $name<'_> {
            #[inline]
            fn proc_block(&mut self, mut block: InOut<'_, '_, Block<Self>>) {
                let mut buf = *block.get_in();
                $block_fn(self.0, &mut buf);
                *block.get_out() = buf;
            }

            #[inline]
            fn proc_par_blocks(&mut self, mut blocks: InOut<'_, '_, ParBlocks<Self>>) {
                let mut buf = [0u8; $bytes];
                for (dst, src) in buf.chunks_exact_mut(BLOCK_SIZE).zip(blocks.get_in().iter()) {
                    dst.copy_from_slice(src);
                }
                // SAFETY: this backend is only handed out once the feature
                // was detected on the running CPU.
                unsafe { $par_fn(self.0, &mut buf) };
                for (dst, src) in blocks.get_out().iter_mut().zip(buf.chunks_exact(BLOCK_SIZE)) {
                    dst.copy_from_slice(src);
                }
            }
        }
    };
}

simd_backend!(Sse2Enc, U4, SSE2_BYTES, encrypt4, super::soft::encrypt_block);
simd_backend!(Sse2Dec, U4, SSE2_BYTES, decrypt4, super::soft::decrypt_block);
simd_backend!(Avx2Enc, U8, AVX2_BYTES, encrypt8, super::soft::encrypt_block);
simd_backend!(Avx2Dec, U8, AVX2_BYTES, decrypt8, super::soft::decrypt_block);
