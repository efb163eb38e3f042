//! LEA: the 128-bit block ARX cipher with 128/192/256-bit keys.

use crate::backends::{self, Backend};
use crate::consts::{DELTA, KEY_ROT, LEA_MAX_ROUNDS, LEA_RK_WORDS};
use crate::Error;
use core::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// LEA block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Expanded LEA key: six 32-bit words per round.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RoundKeys {
    keys: [[u32; LEA_RK_WORDS]; LEA_MAX_ROUNDS],
    rounds: usize,
}

impl RoundKeys {
    /// Runs the key schedule for a 16, 24 or 32-byte key.
    pub fn new(key: &[u8]) -> Result<Self, Error> {
        match key.len() {
            16 | 24 | 32 => Ok(Self::expand(key)),
            len => Err(Error::InvalidKeySize(len)),
        }
    }

    /// Key schedule proper; `key` is already known to be 16, 24 or 32 bytes.
    pub(crate) fn expand(key: &[u8]) -> Self {
        let mut t = [0u32; 8];
        let words = key.len() / 4;
        for (w, chunk) in t.iter_mut().zip(key.chunks_exact(4)) {
            *w = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        let mut rk = Self {
            keys: [[0; LEA_RK_WORDS]; LEA_MAX_ROUNDS],
            rounds: rounds_for(words),
        };

        match words {
            4 => {
                for (i, out) in rk.keys[..24].iter_mut().enumerate() {
                    let d = DELTA[i % 4];
                    let i = i as u32;
                    t[0] = t[0].wrapping_add(d.rotate_left(i)).rotate_left(1);
                    t[1] = t[1].wrapping_add(d.rotate_left(i + 1)).rotate_left(3);
                    t[2] = t[2].wrapping_add(d.rotate_left(i + 2)).rotate_left(6);
                    t[3] = t[3].wrapping_add(d.rotate_left(i + 3)).rotate_left(11);
                    *out = [t[0], t[1], t[2], t[1], t[3], t[1]];
                }
            }
            6 => {
                for (i, out) in rk.keys[..28].iter_mut().enumerate() {
                    let d = DELTA[i % 6];
                    for j in 0..6 {
                        let r = d.rotate_left((i + j) as u32);
                        t[j] = t[j].wrapping_add(r).rotate_left(KEY_ROT[j]);
                    }
                    out.copy_from_slice(&t[..6]);
                }
            }
            _ => {
                for (i, out) in rk.keys.iter_mut().enumerate() {
                    let d = DELTA[i % 8];
                    for j in 0..6 {
                        let k = (6 * i + j) % 8;
                        let r = d.rotate_left((i + j) as u32);
                        t[k] = t[k].wrapping_add(r).rotate_left(KEY_ROT[j]);
                        out[j] = t[k];
                    }
                }
            }
        }

        t.zeroize();
        rk
    }

    /// Number of rounds (24, 28 or 32).
    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Round keys in encryption order, one entry per round.
    #[inline]
    pub fn as_slice(&self) -> &[[u32; LEA_RK_WORDS]] {
        &self.keys[..self.rounds]
    }

    /// Total number of 32-bit round-key words.
    #[inline]
    pub fn word_count(&self) -> usize {
        self.rounds * LEA_RK_WORDS
    }
}

const fn rounds_for(key_words: usize) -> usize {
    match key_words {
        4 => 24,
        6 => 28,
        _ => 32,
    }
}

impl fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundKeys")
            .field("rounds", &self.rounds)
            .finish_non_exhaustive()
    }
}

/// A keyed LEA context.
///
/// The processing backend is chosen once at construction from the cached
/// CPU capability probe and reused for every call.
#[derive(Clone)]
pub struct Lea {
    rk: RoundKeys,
    ecb: bool,
    backend: Backend,
}

impl Lea {
    /// Creates a single-block context: `encrypt`/`decrypt` transform
    /// exactly the first 16 bytes of their buffers.
    pub fn try_new(key: &[u8]) -> Result<Self, Error> {
        Self::with_backend(key, false, Backend::detect())
    }

    /// Creates a wide (ECB) context: `encrypt`/`decrypt` transform every
    /// block of a buffer whose length is a multiple of 16.
    pub fn try_new_ecb(key: &[u8]) -> Result<Self, Error> {
        Self::with_backend(key, true, Backend::detect())
    }

    pub(crate) fn with_backend(key: &[u8], ecb: bool, backend: Backend) -> Result<Self, Error> {
        Ok(Self::bind(RoundKeys::new(key)?, ecb, backend))
    }

    pub(crate) fn bind(rk: RoundKeys, ecb: bool, backend: Backend) -> Self {
        log::debug!(
            "LEA context bound to {:?} backend ({} rounds, ecb={})",
            backend,
            rk.rounds(),
            ecb
        );
        Self { rk, ecb, backend }
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    #[inline]
    pub fn rounds(&self) -> usize {
        self.rk.rounds()
    }

    #[inline]
    pub fn round_keys(&self) -> &RoundKeys {
        &self.rk
    }

    #[inline]
    pub fn is_ecb(&self) -> bool {
        self.ecb
    }

    #[inline]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Encrypts `src` into `dst`. Nothing is written on error.
    pub fn encrypt(&self, dst: &mut [u8], src: &[u8]) -> Result<(), Error> {
        let len = self.checked_len(dst, src)?;
        let out = &mut dst[..len];
        out.copy_from_slice(&src[..len]);
        backends::encrypt_blocks(self.backend, &self.rk, out);
        Ok(())
    }

    /// Decrypts `src` into `dst`. Nothing is written on error.
    pub fn decrypt(&self, dst: &mut [u8], src: &[u8]) -> Result<(), Error> {
        let len = self.checked_len(dst, src)?;
        let out = &mut dst[..len];
        out.copy_from_slice(&src[..len]);
        backends::decrypt_blocks(self.backend, &self.rk, out);
        Ok(())
    }

    pub fn encrypt_in_place(&self, buf: &mut [u8]) -> Result<(), Error> {
        let len = self.checked_in_place_len(buf)?;
        backends::encrypt_blocks(self.backend, &self.rk, &mut buf[..len]);
        Ok(())
    }

    pub fn decrypt_in_place(&self, buf: &mut [u8]) -> Result<(), Error> {
        let len = self.checked_in_place_len(buf)?;
        backends::decrypt_blocks(self.backend, &self.rk, &mut buf[..len]);
        Ok(())
    }

    fn checked_len(&self, dst: &[u8], src: &[u8]) -> Result<usize, Error> {
        let len = self.checked_in_place_len(src)?;
        if dst.len() < len {
            return Err(Error::InvalidBlockSize(dst.len()));
        }
        Ok(len)
    }

    fn checked_in_place_len(&self, buf: &[u8]) -> Result<usize, Error> {
        if buf.len() < BLOCK_SIZE {
            return Err(Error::InvalidBlockSize(buf.len()));
        }
        if !self.ecb {
            return Ok(BLOCK_SIZE);
        }
        if buf.len() % BLOCK_SIZE != 0 {
            return Err(Error::InvalidBlockSize(buf.len()));
        }
        Ok(buf.len())
    }
}

impl fmt::Debug for Lea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lea")
            .field("rounds", &self.rk.rounds())
            .field("ecb", &self.ecb)
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use super::*;
    use alloc::vec;
    use hex_literal::hex;
    use rand_chacha::ChaCha8Rng;
    use rand_core::{RngCore, SeedableRng};

    const KEY_256: [u8; 32] =
        hex!("0f1e2d3c4b5a69788796a5b4c3d2e1f0 f0e1d2c3b4a5968778695a4b3c2d1e0f");

    #[test]
    fn known_answer_vectors() {
        let cases: [(&[u8], [u8; 16], [u8; 16]); 3] = [
            (
                &KEY_256[..16],
                hex!("101112131415161718191a1b1c1d1e1f"),
                hex!("9fc84e3528c6c6185532c7a704648bfd"),
            ),
            (
                &KEY_256[..24],
                hex!("202122232425262728292a2b2c2d2e2f"),
                hex!("6fb95e325aad1b878cdcf5357674c6f2"),
            ),
            (
                &KEY_256[..],
                hex!("303132333435363738393a3b3c3d3e3f"),
                hex!("d651aff647b189c13a8900ca27f9e197"),
            ),
        ];
        for (key, pt, ct) in cases {
            let lea = Lea::try_new(key).unwrap();
            let mut out = [0u8; 16];
            lea.encrypt(&mut out, &pt).unwrap();
            assert_eq!(out, ct, "LEA-{} encryption", key.len() * 8);
            let mut back = [0u8; 16];
            lea.decrypt(&mut back, &out).unwrap();
            assert_eq!(back, pt, "LEA-{} decryption", key.len() * 8);
        }
    }

    #[test]
    fn round_count_follows_key_size() {
        for (len, rounds, words) in [(16, 24, 144), (24, 28, 168), (32, 32, 192)] {
            let rk = RoundKeys::new(&KEY_256[..len]).unwrap();
            assert_eq!(rk.rounds(), rounds);
            assert_eq!(rk.as_slice().len(), rounds);
            assert_eq!(rk.word_count(), words);
        }
    }

    #[test]
    fn lea128_round_key_repeats_t1() {
        let rk = RoundKeys::new(&KEY_256[..16]).unwrap();
        for round in rk.as_slice() {
            assert_eq!(round[1], round[3]);
            assert_eq!(round[1], round[5]);
        }
    }

    #[test]
    fn rejects_invalid_key_sizes() {
        for len in [0, 1, 8, 15, 17, 20, 23, 25, 31, 33, 64] {
            let key = vec![0u8; len];
            assert_eq!(Lea::try_new(&key).unwrap_err(), Error::InvalidKeySize(len));
            assert_eq!(Lea::try_new_ecb(&key).unwrap_err(), Error::InvalidKeySize(len));
        }
    }

    #[test]
    fn single_block_mode_processes_first_block_only() {
        let lea = Lea::try_new(&KEY_256[..16]).unwrap();
        let src = [0x42u8; 40];
        let mut dst = [0u8; 40];
        lea.encrypt(&mut dst, &src).unwrap();
        assert_ne!(dst[..16], src[..16]);
        assert_eq!(dst[16..], [0u8; 24]);
    }

    #[test]
    fn short_buffers_are_rejected_without_writing() {
        let lea = Lea::try_new(&KEY_256).unwrap();
        let mut dst = [0xaau8; 16];
        assert_eq!(lea.encrypt(&mut dst, &[0u8; 15]), Err(Error::InvalidBlockSize(15)));
        assert_eq!(dst, [0xaa; 16]);

        let mut short = [0xaau8; 8];
        assert_eq!(lea.decrypt(&mut short, &[0u8; 16]), Err(Error::InvalidBlockSize(8)));
        assert_eq!(short, [0xaa; 8]);
    }

    #[test]
    fn ecb_mode_requires_whole_blocks() {
        let lea = Lea::try_new_ecb(&KEY_256[..24]).unwrap();
        assert!(lea.is_ecb());

        let mut dst = [0x55u8; 48];
        assert_eq!(lea.encrypt(&mut dst, &[0u8; 40]), Err(Error::InvalidBlockSize(40)));
        assert_eq!(lea.encrypt(&mut dst[..32], &[0u8; 48]), Err(Error::InvalidBlockSize(32)));
        assert_eq!(dst, [0x55; 48]);

        let mut buf = [0u8; 17];
        assert_eq!(lea.encrypt_in_place(&mut buf), Err(Error::InvalidBlockSize(17)));
    }

    #[test]
    fn ecb_matches_single_block_calls() {
        let single = Lea::try_new(&KEY_256).unwrap();
        let wide = Lea::try_new_ecb(&KEY_256).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut src = [0u8; BLOCK_SIZE * 11];
        rng.fill_bytes(&mut src);

        let mut bulk = [0u8; BLOCK_SIZE * 11];
        wide.encrypt(&mut bulk, &src).unwrap();

        for (i, block) in src.chunks_exact(BLOCK_SIZE).enumerate() {
            let mut out = [0u8; BLOCK_SIZE];
            single.encrypt(&mut out, block).unwrap();
            assert_eq!(out, bulk[i * BLOCK_SIZE..(i + 1) * BLOCK_SIZE], "block {i}");
        }
    }

    #[test]
    fn decrypt_inverts_encrypt_for_random_keys() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for key_len in [16, 24, 32] {
            for _ in 0..64 {
                let mut key = [0u8; 32];
                rng.fill_bytes(&mut key);
                let lea = Lea::try_new_ecb(&key[..key_len]).unwrap();

                let mut plaintext = [0u8; BLOCK_SIZE * 9];
                rng.fill_bytes(&mut plaintext);
                let mut buf = plaintext;
                lea.encrypt_in_place(&mut buf).unwrap();
                assert_ne!(buf, plaintext);
                lea.decrypt_in_place(&mut buf).unwrap();
                assert_eq!(buf, plaintext);
            }
        }
    }
}
