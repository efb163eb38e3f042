//! LSH-512 hash family: 512, 384, 256 and 224-bit outputs over one 64-bit
//! wide-pipe compression function.

use crate::consts::{
    ALPHA_EVEN, ALPHA_ODD, BETA_EVEN, BETA_ODD, GAMMA, NUM_STEPS, SC, SIGMA, TAU,
};
use crate::variant::{LshVariant, Out224, Out256, Out384, Out512};
use crate::Error;
use core::fmt;
use core::marker::PhantomData;
use digest::{
    consts::U256,
    core_api::BlockSizeUser,
    FixedOutput, FixedOutputReset, HashMarker, Output, OutputSizeUser, Reset, Update,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Message block size in bytes.
pub const BLOCK_SIZE: usize = 256;
const CV_WORDS: usize = 16;
const MAX_OUTPUT: usize = 64;

/// LSH-512 with the full 512-bit output.
pub type Lsh512 = Lsh512Var<Out512>;
/// LSH-512 truncated to 384 bits.
pub type Lsh384 = Lsh512Var<Out384>;
/// LSH-512 truncated to 256 bits.
pub type Lsh512_256 = Lsh512Var<Out256>;
/// LSH-512 truncated to 224 bits.
pub type Lsh512_224 = Lsh512Var<Out224>;

/// Streaming LSH-512 state, parameterized by output length.
///
/// Input is absorbed in 256-byte blocks; a full buffer is compressed as soon
/// as it fills, so at most 255 bytes are ever pending.
#[derive(Clone)]
pub struct Lsh512Var<V: LshVariant> {
    cv: [u64; CV_WORDS],
    buffer: [u8; BLOCK_SIZE],
    buffered: usize,
    processed: u64,
    _variant: PhantomData<V>,
}

impl<V: LshVariant> Lsh512Var<V> {
    pub fn new() -> Self {
        Self {
            cv: V::IV,
            buffer: [0; BLOCK_SIZE],
            buffered: 0,
            processed: 0,
            _variant: PhantomData,
        }
    }

    /// Digest length in bytes.
    pub fn size(&self) -> usize {
        V::OUTPUT_BITS / 8
    }

    pub fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// Total bytes written since construction or the last reset.
    pub fn processed_bytes(&self) -> u64 {
        self.processed
    }

    /// Absorbs `data` and returns the number of bytes consumed, which is
    /// always `data.len()`.
    pub fn write(&mut self, data: &[u8]) -> usize {
        let n = data.len();
        self.processed = self.processed.wrapping_add(n as u64);

        let mut data = data;
        if self.buffered > 0 {
            let take = (BLOCK_SIZE - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
            if self.buffered < BLOCK_SIZE {
                return n;
            }
            compress(&mut self.cv, &self.buffer);
            self.buffered = 0;
        }

        let (blocks, rest) = data.as_chunks::<BLOCK_SIZE>();
        for block in blocks {
            compress(&mut self.cv, block);
        }
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
        n
    }

    /// Absorbs the first `bit_len` bits of `data`. Only whole bytes are
    /// supported; any other length fails and leaves the state untouched.
    pub fn write_bits(&mut self, data: &[u8], bit_len: usize) -> Result<(), Error> {
        if bit_len % 8 != 0 || bit_len / 8 > data.len() {
            return Err(Error::InvalidDataBitLength(bit_len));
        }
        self.write(&data[..bit_len / 8]);
        Ok(())
    }

    /// Digest of everything written so far. The state is not consumed, so
    /// writing may continue afterwards.
    pub fn sum(&self) -> Output<Self> {
        let mut out = Output::<Self>::default();
        self.finalize_to(&mut out);
        out
    }

    /// Returns to the freshly constructed state.
    pub fn reset(&mut self) {
        self.cv = V::IV;
        self.buffer.zeroize();
        self.buffered = 0;
        self.processed = 0;
    }

    fn finalize_to(&self, out: &mut [u8]) {
        let mut cv = self.cv;
        let mut block = [0u8; BLOCK_SIZE];
        block[..self.buffered].copy_from_slice(&self.buffer[..self.buffered]);
        block[self.buffered] = 0x80;
        compress(&mut cv, &block);

        let mut h = [0u8; MAX_OUTPUT];
        for (l, chunk) in h.chunks_exact_mut(8).enumerate() {
            chunk.copy_from_slice(&(cv[l] ^ cv[l + 8]).to_le_bytes());
        }
        out.copy_from_slice(&h[..out.len()]);

        cv.zeroize();
        block.zeroize();
        h.zeroize();
    }
}

/// One compression: folds a 256-byte block into the chaining value.
pub(crate) fn compress(cv: &mut [u64; CV_WORDS], block: &[u8; BLOCK_SIZE]) {
    let (words, _) = block.as_chunks::<8>();
    let mut even = [0u64; CV_WORDS];
    let mut odd = [0u64; CV_WORDS];
    for (l, w) in words.iter().enumerate() {
        let w = u64::from_le_bytes(*w);
        if l < CV_WORDS {
            even[l] = w;
        } else {
            odd[l - CV_WORDS] = w;
        }
    }

    let mut t = *cv;
    for j in (0..NUM_STEPS).step_by(2) {
        step(&mut t, &even, &SC[j], ALPHA_EVEN, BETA_EVEN);
        step(&mut t, &odd, &SC[j + 1], ALPHA_ODD, BETA_ODD);
        expand(&mut even, &odd);
        expand(&mut odd, &even);
    }

    // `even` now holds the final expanded message.
    for (c, (t, m)) in cv.iter_mut().zip(t.iter().zip(even.iter())) {
        *c = t ^ m;
    }

    t.zeroize();
    even.zeroize();
    odd.zeroize();
}

/// Replaces `older` with the next message word array:
/// `m[l] = newer[l] + older[tau[l]]`.
#[inline(always)]
fn expand(older: &mut [u64; CV_WORDS], newer: &[u64; CV_WORDS]) {
    let prev = *older;
    for l in 0..CV_WORDS {
        older[l] = newer[l].wrapping_add(prev[TAU[l]]);
    }
}

#[inline(always)]
fn step(t: &mut [u64; CV_WORDS], m: &[u64; CV_WORDS], sc: &[u64; 8], alpha: u32, beta: u32) {
    for (t, m) in t.iter_mut().zip(m) {
        *t ^= m;
    }
    for l in 0..8 {
        let mut x = t[l];
        let mut y = t[l + 8];
        x = x.wrapping_add(y).rotate_left(alpha) ^ sc[l];
        y = y.wrapping_add(x).rotate_left(beta);
        x = x.wrapping_add(y);
        y = y.rotate_left(GAMMA[l]);
        t[l] = x;
        t[l + 8] = y;
    }
    let mixed = *t;
    for l in 0..CV_WORDS {
        t[l] = mixed[SIGMA[l]];
    }
}

fn oneshot<V: LshVariant, const N: usize>(data: &[u8]) -> [u8; N] {
    let mut h = Lsh512Var::<V>::new();
    h.write(data);
    debug_assert_eq!(h.size(), N);
    let mut out = [0u8; N];
    h.finalize_to(&mut out);
    out
}

/// LSH-512 digest of `data`.
pub fn sum512(data: &[u8]) -> [u8; 64] {
    oneshot::<Out512, 64>(data)
}

/// LSH-384 digest of `data`.
pub fn sum384(data: &[u8]) -> [u8; 48] {
    oneshot::<Out384, 48>(data)
}

/// LSH-512-256 digest of `data`.
pub fn sum512_256(data: &[u8]) -> [u8; 32] {
    oneshot::<Out256, 32>(data)
}

/// LSH-512-224 digest of `data`.
pub fn sum512_224(data: &[u8]) -> [u8; 28] {
    oneshot::<Out224, 28>(data)
}

impl<V: LshVariant> Default for Lsh512Var<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: LshVariant> HashMarker for Lsh512Var<V> {}

impl<V: LshVariant> OutputSizeUser for Lsh512Var<V> {
    type OutputSize = V::OutputSize;
}

impl<V: LshVariant> BlockSizeUser for Lsh512Var<V> {
    type BlockSize = U256;
}

impl<V: LshVariant> Update for Lsh512Var<V> {
    fn update(&mut self, data: &[u8]) {
        self.write(data);
    }
}

impl<V: LshVariant> FixedOutput for Lsh512Var<V> {
    fn finalize_into(self, out: &mut Output<Self>) {
        self.finalize_to(out);
    }
}

impl<V: LshVariant> Reset for Lsh512Var<V> {
    fn reset(&mut self) {
        Lsh512Var::reset(self);
    }
}

impl<V: LshVariant> FixedOutputReset for Lsh512Var<V> {
    fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
        self.finalize_to(out);
        Lsh512Var::reset(self);
    }
}

impl<V: LshVariant> fmt::Debug for Lsh512Var<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ ... }}", V::NAME)
    }
}

impl<V: LshVariant> Zeroize for Lsh512Var<V> {
    fn zeroize(&mut self) {
        self.cv.zeroize();
        self.buffer.zeroize();
        self.buffered = 0;
        self.processed = 0;
    }
}

impl<V: LshVariant> Drop for Lsh512Var<V> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<V: LshVariant> ZeroizeOnDrop for Lsh512Var<V> {}
