//======================================================================
// krypto Crate Test Suite
//======================================================================
#![cfg(test)]

extern crate alloc;
use alloc::format;
use alloc::vec;

use crate::lea::Lea;
use crate::lsh512::{sum384, sum512, sum512_224, sum512_256};
use crate::{Backend, Error, Lea128, Lea192, Lea256, Lsh384, Lsh512, Lsh512_224, Lsh512_256, Seed};
use cipher::generic_array::GenericArray;
use cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use digest::{Digest, FixedOutputReset};
use hex_literal::hex;
use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};

const KEY_256: [u8; 32] =
    hex!("0f1e2d3c4b5a69788796a5b4c3d2e1f0f0e1d2c3b4a5968778695a4b3c2d1e0f");

//======================================================================
// LEA: cipher traits vs byte-slice context
//======================================================================

#[test]
fn lea_trait_kat() {
    let key = GenericArray::from(KEY_256);
    let cipher = Lea256::new(&key);
    let mut block = GenericArray::from(hex!("303132333435363738393a3b3c3d3e3f"));
    cipher.encrypt_block(&mut block);
    assert_eq!(block.as_slice(), &hex!("d651aff647b189c13a8900ca27f9e197"));
    cipher.decrypt_block(&mut block);
    assert_eq!(block.as_slice(), &hex!("303132333435363738393a3b3c3d3e3f"));
}

#[test]
fn lea_trait_bulk_matches_context() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut key = [0u8; 24];
    rng.fill_bytes(&mut key);

    let mut data = vec![0u8; 37 * 16];
    rng.fill_bytes(&mut data);
    let plaintext = data.clone();

    let ctx = Lea::try_new_ecb(&key).unwrap();
    let mut expected = data.clone();
    ctx.encrypt_in_place(&mut expected).unwrap();

    let cipher = Lea192::new_from_slice(&key).unwrap();
    let mut blocks: alloc::vec::Vec<_> = data
        .chunks_exact(16)
        .map(|c| GenericArray::clone_from_slice(c))
        .collect();
    cipher.encrypt_blocks(&mut blocks);
    for (got, want) in blocks.iter().zip(expected.chunks_exact(16)) {
        assert_eq!(got.as_slice(), want);
    }

    cipher.decrypt_blocks(&mut blocks);
    for (got, want) in blocks.iter().zip(plaintext.chunks_exact(16)) {
        assert_eq!(got.as_slice(), want);
    }
}

#[test]
fn lea_trait_rejects_wrong_key_length() {
    assert!(Lea128::new_from_slice(&[0u8; 24]).is_err());
    assert!(Lea192::new_from_slice(&[0u8; 16]).is_err());
    assert!(Lea256::new_from_slice(&[0u8; 31]).is_err());
}

#[test]
fn lea_backend_choice_is_invisible() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut data = vec![0u8; 64 * 16];
    rng.fill_bytes(&mut data);

    let soft = Lea::with_backend(&KEY_256, true, Backend::Soft).unwrap();
    let detected = Lea::try_new_ecb(&KEY_256).unwrap();
    assert_eq!(detected.backend(), Backend::detect());

    let mut a = data.clone();
    let mut b = data.clone();
    soft.encrypt_in_place(&mut a).unwrap();
    detected.encrypt_in_place(&mut b).unwrap();
    assert_eq!(a, b);

    let typed = Lea256::new(&GenericArray::from(KEY_256));
    assert_eq!(typed.backend(), Backend::detect());
}

#[test]
fn lea_names() {
    assert_eq!(format!("{:?}", Lea128::new(&Default::default())), "LEA-128 { ... }");
    let ctx = Lea::try_new(&[0u8; 16]).unwrap();
    let shown = format!("{ctx:?}");
    assert!(shown.contains("rounds: 24"));
    assert!(!shown.contains("rk"));
}

//======================================================================
// SEED: cipher traits vs byte-slice context
//======================================================================

#[test]
fn seed_trait_matches_context() {
    let key = hex!("4706480851e61be85d74bfb3fd956185");
    let pt = hex!("83a2f8a288641fb9a4e9a5cc2f131c7d");
    let ct = hex!("ee54d13ebcae706d226bc3142cd40d4a");

    let cipher = <Seed as KeyInit>::new(&key.into());
    let mut block = GenericArray::from(pt);
    cipher.encrypt_block(&mut block);
    assert_eq!(block.as_slice(), &ct);
    cipher.decrypt_block(&mut block);
    assert_eq!(block.as_slice(), &pt);

    let ctx = Seed::try_new(&key).unwrap();
    let mut out = [0u8; 16];
    ctx.encrypt(&mut out, &pt).unwrap();
    assert_eq!(out, ct);

    assert!(<Seed as KeyInit>::new_from_slice(&key[..15]).is_err());
    assert_eq!(Seed::try_new(&key[..15]).unwrap_err(), Error::InvalidKeySize(15));
}

//======================================================================
// LSH-512: digest traits vs inherent API
//======================================================================

#[test]
fn lsh_digest_trait() {
    assert_eq!(Lsh512::digest(b"abc").as_slice(), &sum512(b"abc")[..]);
    assert_eq!(Lsh384::digest(b"abc").as_slice(), &sum384(b"abc")[..]);
    assert_eq!(Lsh512_256::digest(b"abc").as_slice(), &sum512_256(b"abc")[..]);
    assert_eq!(Lsh512_224::digest(b"abc").as_slice(), &sum512_224(b"abc")[..]);
    assert_eq!(<Lsh512_224 as Digest>::output_size(), 28);
}

#[test]
fn lsh_streaming_via_digest_trait() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x15);
    let mut data = vec![0u8; 3000];
    rng.fill_bytes(&mut data);

    let mut hasher = Lsh512::new();
    let mut rest = &data[..];
    while !rest.is_empty() {
        let n = (rng.next_u32() as usize % 300).min(rest.len());
        Digest::update(&mut hasher, &rest[..n]);
        rest = &rest[n..];
    }
    assert_eq!(hasher.finalize().as_slice(), &sum512(&data)[..]);
}

#[test]
fn lsh_finalize_reset() {
    let mut hasher = Lsh512_256::default();
    Digest::update(&mut hasher, b"abc");
    let first = hasher.finalize_fixed_reset();
    assert_eq!(first.as_slice(), &sum512_256(b"abc")[..]);
    assert_eq!(hasher.processed_bytes(), 0);
    Digest::update(&mut hasher, b"abc");
    assert_eq!(hasher.finalize_fixed_reset(), first);
}

#[test]
fn lsh_names() {
    assert_eq!(format!("{:?}", Lsh512::new()), "LSH-512 { ... }");
    assert_eq!(format!("{:?}", Lsh512_224::new()), "LSH-512-224 { ... }");
}
