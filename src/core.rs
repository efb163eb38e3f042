use crate::backends::{soft, Backend};
use crate::lea::{Lea, RoundKeys};
use crate::LeaVariant;
use cipher::{
    consts::U16, AlgorithmName, BlockCipher, BlockClosure, BlockDecrypt, BlockEncrypt,
    BlockSizeUser, Key, KeyInit, KeySizeUser,
};
use core::fmt;
use core::marker::PhantomData;
use zeroize::ZeroizeOnDrop;

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(krypto_force_soft)))]
use crate::backends::simd;

/// LEA with a key size fixed at the type level, for use through the
/// `cipher` crate traits.
#[derive(Clone)]
pub struct LeaCore<V: LeaVariant> {
    /// Keyed context; always in wide mode so bulk calls reach the SIMD path.
    pub(crate) inner: Lea,
    pub(crate) _variant: PhantomData<V>,
}

impl<V: LeaVariant> LeaCore<V> {
    /// Backend bound at construction.
    pub fn backend(&self) -> Backend {
        self.inner.backend()
    }
}

impl<V: LeaVariant> KeySizeUser for LeaCore<V> {
    type KeySize = V::KeySize;
}

impl<V: LeaVariant> BlockSizeUser for LeaCore<V> {
    type BlockSize = U16;
}

impl<V: LeaVariant> BlockCipher for LeaCore<V> {}

impl<V: LeaVariant> KeyInit for LeaCore<V> {
    fn new(key: &Key<Self>) -> Self {
        let rk = RoundKeys::expand(key);
        debug_assert_eq!(rk.rounds(), V::ROUNDS);
        Self {
            inner: Lea::bind(rk, true, Backend::detect()),
            _variant: PhantomData,
        }
    }
}

impl<V: LeaVariant> BlockEncrypt for LeaCore<V> {
    fn encrypt_with_backend(&self, f: impl BlockClosure<BlockSize = Self::BlockSize>) {
        let rk = self.inner.round_keys();
        match self.inner.backend() {
            Backend::Soft => f.call(&mut soft::EncBackend(rk)),
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(krypto_force_soft)))]
            Backend::Sse2 => f.call(&mut simd::Sse2Enc(rk)),
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(krypto_force_soft)))]
            Backend::Avx2 => f.call(&mut simd::Avx2Enc(rk)),
        }
    }
}

impl<V: LeaVariant> BlockDecrypt for LeaCore<V> {
    fn decrypt_with_backend(&self, f: impl BlockClosure<BlockSize = Self::BlockSize>) {
        let rk = self.inner.round_keys();
        match self.inner.backend() {
            Backend::Soft => f.call(&mut soft::DecBackend(rk)),
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(krypto_force_soft)))]
            Backend::Sse2 => f.call(&mut simd::Sse2Dec(rk)),
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), not(krypto_force_soft)))]
            Backend::Avx2 => f.call(&mut simd::Avx2Dec(rk)),
        }
    }
}

impl<V: LeaVariant> AlgorithmName for LeaCore<V> {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(V::NAME)
    }
}

impl<V: LeaVariant> fmt::Debug for LeaCore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ ... }}", V::NAME)
    }
}

impl<V: LeaVariant> ZeroizeOnDrop for LeaCore<V> {}
