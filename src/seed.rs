//! SEED: the 128-bit Feistel block cipher (RFC 4269).

use crate::consts::{KC, SS0, SS1, SS2, SS3};
use crate::Error;
use cipher::{
    consts::{U1, U16},
    inout::InOut,
    AlgorithmName, Block, BlockBackend, BlockCipher, BlockClosure, BlockDecrypt, BlockEncrypt,
    BlockSizeUser, Key, KeyInit, KeySizeUser, ParBlocksSizeUser,
};
use core::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// SEED block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// SEED key size in bytes.
pub const KEY_SIZE: usize = 16;

const ROUNDS: usize = 16;

/// The SEED G function: four S-box lookups folded through the fixed
/// byte-mask diffusion, precomputed into the `SS` tables.
#[inline(always)]
fn g(x: u32) -> u32 {
    SS0[(x & 0xff) as usize]
        ^ SS1[((x >> 8) & 0xff) as usize]
        ^ SS2[((x >> 16) & 0xff) as usize]
        ^ SS3[(x >> 24) as usize]
}

/// The SEED F function applied to the right half `(r0, r1)` already
/// whitened with the round-key pair.
#[inline(always)]
fn round_f(mut c: u32, mut d: u32) -> (u32, u32) {
    d ^= c;
    d = g(d);
    c = c.wrapping_add(d);
    c = g(c);
    d = d.wrapping_add(c);
    d = g(d);
    c = c.wrapping_add(d);
    (c, d)
}

/// A keyed SEED context holding the 16 round-key pairs.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed {
    round_keys: [u32; 2 * ROUNDS],
}

impl Seed {
    /// Runs the key schedule. Only 16-byte keys are accepted.
    pub fn try_new(key: &[u8]) -> Result<Self, Error> {
        if key.len() != KEY_SIZE {
            return Err(Error::InvalidKeySize(key.len()));
        }
        Ok(Self::expand(key))
    }

    fn expand(key: &[u8]) -> Self {
        let mut w = [0u32; 4];
        for (w, chunk) in w.iter_mut().zip(key.chunks_exact(4)) {
            *w = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        let [mut a, mut b, mut c, mut d] = w;

        let mut round_keys = [0u32; 2 * ROUNDS];
        for (i, pair) in round_keys.chunks_exact_mut(2).enumerate() {
            pair[0] = g(a.wrapping_add(c).wrapping_sub(KC[i]));
            pair[1] = g(b.wrapping_sub(d).wrapping_add(KC[i]));

            if i % 2 == 0 {
                // A||B >>> 8
                let t = a;
                a = (a >> 8) ^ (b << 24);
                b = (b >> 8) ^ (t << 24);
            } else {
                // C||D <<< 8
                let t = c;
                c = (c << 8) ^ (d >> 24);
                d = (d << 8) ^ (t >> 24);
            }
        }

        w.zeroize();
        Self { round_keys }
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// Encrypts the first block of `src` into `dst`.
    ///
    /// Either buffer being shorter than a block is a caller error and leaves
    /// `dst` untouched.
    pub fn encrypt(&self, dst: &mut [u8], src: &[u8]) -> Result<(), Error> {
        let (dst, src) = split_block(dst, src)?;
        dst.copy_from_slice(&self.encrypt_words(load(src)));
        Ok(())
    }

    /// Decrypts the first block of `src` into `dst`.
    pub fn decrypt(&self, dst: &mut [u8], src: &[u8]) -> Result<(), Error> {
        let (dst, src) = split_block(dst, src)?;
        dst.copy_from_slice(&self.decrypt_words(load(src)));
        Ok(())
    }

    fn encrypt_words(&self, mut x: [u32; 4]) -> [u8; BLOCK_SIZE] {
        for (round, k) in self.round_keys.chunks_exact(2).enumerate() {
            if round % 2 == 0 {
                let (t0, t1) = round_f(x[2] ^ k[0], x[3] ^ k[1]);
                x[0] ^= t0;
                x[1] ^= t1;
            } else {
                let (t0, t1) = round_f(x[0] ^ k[0], x[1] ^ k[1]);
                x[2] ^= t0;
                x[3] ^= t1;
            }
        }
        store([x[2], x[3], x[0], x[1]])
    }

    fn decrypt_words(&self, mut x: [u32; 4]) -> [u8; BLOCK_SIZE] {
        for (round, k) in self.round_keys.chunks_exact(2).enumerate().rev() {
            if round % 2 == 0 {
                let (t0, t1) = round_f(x[0] ^ k[0], x[1] ^ k[1]);
                x[2] ^= t0;
                x[3] ^= t1;
            } else {
                let (t0, t1) = round_f(x[2] ^ k[0], x[3] ^ k[1]);
                x[0] ^= t0;
                x[1] ^= t1;
            }
        }
        store([x[2], x[3], x[0], x[1]])
    }
}

fn split_block<'a, 'b>(
    dst: &'a mut [u8],
    src: &'b [u8],
) -> Result<(&'a mut [u8], &'b [u8]), Error> {
    if src.len() < BLOCK_SIZE {
        return Err(Error::InvalidBlockSize(src.len()));
    }
    if dst.len() < BLOCK_SIZE {
        return Err(Error::InvalidBlockSize(dst.len()));
    }
    Ok((&mut dst[..BLOCK_SIZE], &src[..BLOCK_SIZE]))
}

#[inline(always)]
fn load(block: &[u8]) -> [u32; 4] {
    let mut x = [0u32; 4];
    for (w, chunk) in x.iter_mut().zip(block.chunks_exact(4)) {
        *w = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    x
}

#[inline(always)]
fn store(x: [u32; 4]) -> [u8; BLOCK_SIZE] {
    let mut out = [0u8; BLOCK_SIZE];
    for (w, chunk) in x.iter().zip(out.chunks_exact_mut(4)) {
        chunk.copy_from_slice(&w.to_be_bytes());
    }
    out
}

// --- `cipher` trait integration ---

impl KeySizeUser for Seed {
    type KeySize = U16;
}

impl BlockSizeUser for Seed {
    type BlockSize = U16;
}

impl BlockCipher for Seed {}

impl KeyInit for Seed {
    fn new(key: &Key<Self>) -> Self {
        Self::expand(key)
    }
}

impl BlockEncrypt for Seed {
    fn encrypt_with_backend(&self, f: impl BlockClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut EncBackend(self))
    }
}

impl BlockDecrypt for Seed {
    fn decrypt_with_backend(&self, f: impl BlockClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut DecBackend(self))
    }
}

impl AlgorithmName for Seed {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SEED")
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed { ... }")
    }
}

struct EncBackend<'a>(&'a Seed);

struct DecBackend<'a>(&'a Seed);

impl BlockSizeUser for EncBackend<'_> {
    type BlockSize = U16;
}

impl ParBlocksSizeUser for EncBackend<'_> {
    type ParBlocksSize = U1;
}

impl BlockBackend for EncBackend<'_> {
    #[inline]
    fn proc_block(&mut self, mut block: InOut<'_, '_, Block<Self>>) {
        let out = self.0.encrypt_words(load(block.get_in()));
        block.get_out().copy_from_slice(&out);
    }
}

impl BlockSizeUser for DecBackend<'_> {
    type BlockSize = U16;
}

impl ParBlocksSizeUser for DecBackend<'_> {
    type ParBlocksSize = U1;
}

impl BlockBackend for DecBackend<'_> {
    #[inline]
    fn proc_block(&mut self, mut block: InOut<'_, '_, Block<Self>>) {
        let out = self.0.decrypt_words(load(block.get_in()));
        block.get_out().copy_from_slice(&out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use rand_chacha::ChaCha8Rng;
    use rand_core::{RngCore, SeedableRng};

    // RFC 4269, Appendix B.
    const VECTORS: [([u8; 16], [u8; 16], [u8; 16]); 4] = [
        (
            hex!("00000000000000000000000000000000"),
            hex!("000102030405060708090a0b0c0d0e0f"),
            hex!("5ebac6e0054e166819aff1cc6d346cdb"),
        ),
        (
            hex!("000102030405060708090a0b0c0d0e0f"),
            hex!("00000000000000000000000000000000"),
            hex!("c11f22f20140505084483597e4370f43"),
        ),
        (
            hex!("4706480851e61be85d74bfb3fd956185"),
            hex!("83a2f8a288641fb9a4e9a5cc2f131c7d"),
            hex!("ee54d13ebcae706d226bc3142cd40d4a"),
        ),
        (
            hex!("28dbc3bc49ffd87dcfa509b11d422be7"),
            hex!("b41e6be2eba84a148e2eed84593c5ec7"),
            hex!("9b9b7bfcd1813cb95d0b3618f40f5122"),
        ),
    ];

    #[test]
    fn known_answer_vectors() {
        for (key, pt, ct) in VECTORS {
            let seed = Seed::try_new(&key).unwrap();
            let mut out = [0u8; 16];
            seed.encrypt(&mut out, &pt).unwrap();
            assert_eq!(out, ct);

            let mut back = [0u8; 16];
            seed.decrypt(&mut back, &ct).unwrap();
            assert_eq!(back, pt);
        }
    }

    #[test]
    fn first_round_key_pair() {
        // Zero key: round keys are G(-KC0) and G(KC0).
        let seed = Seed::try_new(&[0u8; 16]).unwrap();
        assert_eq!(seed.round_keys[0], g(0u32.wrapping_sub(KC[0])));
        assert_eq!(seed.round_keys[1], g(KC[0]));
    }

    #[test]
    fn rejects_invalid_key_sizes() {
        for len in [0usize, 8, 15, 17, 24, 32] {
            let key = [0u8; 32];
            assert_eq!(
                Seed::try_new(&key[..len]).unwrap_err(),
                Error::InvalidKeySize(len)
            );
        }
    }

    #[test]
    fn short_buffers_are_rejected_without_writing() {
        let seed = Seed::try_new(&[1u8; 16]).unwrap();

        let mut dst = [0xeeu8; 16];
        assert_eq!(seed.encrypt(&mut dst, &[0u8; 12]), Err(Error::InvalidBlockSize(12)));
        assert_eq!(seed.decrypt(&mut dst, &[0u8; 0]), Err(Error::InvalidBlockSize(0)));
        assert_eq!(dst, [0xee; 16]);

        let mut short = [0xeeu8; 15];
        assert_eq!(seed.encrypt(&mut short, &[0u8; 16]), Err(Error::InvalidBlockSize(15)));
        assert_eq!(short, [0xee; 15]);
    }

    #[test]
    fn only_first_block_is_touched() {
        let seed = Seed::try_new(&[7u8; 16]).unwrap();
        let mut dst = [0u8; 32];
        seed.encrypt(&mut dst, &[9u8; 32]).unwrap();
        assert_eq!(dst[16..], [0u8; 16]);
    }

    #[test]
    fn decrypt_inverts_encrypt_for_random_keys() {
        let mut rng = ChaCha8Rng::seed_from_u64(4269);
        for _ in 0..256 {
            let mut key = [0u8; 16];
            let mut pt = [0u8; 16];
            rng.fill_bytes(&mut key);
            rng.fill_bytes(&mut pt);

            let seed = Seed::try_new(&key).unwrap();
            let mut ct = [0u8; 16];
            seed.encrypt(&mut ct, &pt).unwrap();
            let mut back = [0u8; 16];
            seed.decrypt(&mut back, &ct).unwrap();
            assert_eq!(back, pt);
        }
    }
}
