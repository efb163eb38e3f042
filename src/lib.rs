//! LEA, SEED and LSH-512: the KISA-standard block ciphers and hash family.
//!
//! LEA is available in two shapes. [`lea::Lea`] is the byte-slice context
//! with runtime key-size selection and checked buffer lengths; it dispatches
//! bulk (ECB) work to an AVX2 or SSE2 backend when the CPU has one.
//! [`Lea128`], [`Lea192`] and [`Lea256`] fix the key size in the type and
//! implement the `cipher` crate traits. SEED follows the same pattern with a
//! single type, [`seed::Seed`].
//!
//! The LSH-512 family lives in [`lsh512`] and implements the `digest` crate
//! traits, so `Lsh512::digest(data)` works as for any other hash.

#![no_std]

pub use cipher; // Re-export for downstream trait imports
pub use digest;

// --- Security Parameter Abstraction ---
mod variant;
pub use variant::{Key128, Key192, Key256, LeaVariant, LshVariant, Out224, Out256, Out384, Out512};

mod error;
pub use error::Error;

// --- Constants and Round Functions ---
pub(crate) mod arx;
pub(crate) mod consts;

// --- Backends ---
pub(crate) mod backends;
pub use backends::{simd_available, Backend};

// --- Core Cipher Logic ---
mod core;
pub use crate::core::LeaCore;

pub mod lea;
pub mod lsh512;
pub mod seed;

// --- Convenience Type Aliases for Users ---
pub type Lea128 = LeaCore<Key128>;
pub type Lea192 = LeaCore<Key192>;
pub type Lea256 = LeaCore<Key256>;
pub use lsh512::{Lsh384, Lsh512, Lsh512_224, Lsh512_256};
pub use seed::Seed;

#[cfg(test)]
mod tests;
