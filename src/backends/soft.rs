use crate::arx::{dec_round, enc_round};
use crate::lea::{RoundKeys, BLOCK_SIZE};
use cipher::{
    consts::{U1, U16},
    inout::InOut,
    Block, BlockBackend, BlockSizeUser, ParBlocksSizeUser,
};

#[inline(always)]
fn load(block: &[u8]) -> [u32; 4] {
    let mut x = [0u32; 4];
    for (w, chunk) in x.iter_mut().zip(block.chunks_exact(4)) {
        *w = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    x
}

#[inline(always)]
fn store(x: &[u32; 4], block: &mut [u8]) {
    for (w, chunk) in x.iter().zip(block.chunks_exact_mut(4)) {
        chunk.copy_from_slice(&w.to_le_bytes());
    }
}

/// Encrypts one 16-byte block in place.
#[inline]
pub(crate) fn encrypt_block(rk: &RoundKeys, block: &mut [u8]) {
    debug_assert_eq!(block.len(), BLOCK_SIZE);
    let mut x = load(block);
    for round in rk.as_slice() {
        enc_round(&mut x, round);
    }
    store(&x, block);
}

/// Decrypts one 16-byte block in place, walking the round keys backwards.
#[inline]
pub(crate) fn decrypt_block(rk: &RoundKeys, block: &mut [u8]) {
    debug_assert_eq!(block.len(), BLOCK_SIZE);
    let mut x = load(block);
    for round in rk.as_slice().iter().rev() {
        dec_round(&mut x, round);
    }
    store(&x, block);
}

/// The software encryption backend for LEA.
pub(crate) struct EncBackend<'a>(pub(crate) &'a RoundKeys);

/// The software decryption backend for LEA.
pub(crate) struct DecBackend<'a>(pub(crate) &'a RoundKeys);

impl BlockSizeUser for EncBackend<'_> {
    type BlockSize = U16;
}

impl ParBlocksSizeUser for EncBackend<'_> {
    type ParBlocksSize = U1;
}

impl BlockBackend for EncBackend<'_> {
    #[inline]
    fn proc_block(&mut self, mut block: InOut<'_, '_, Block<Self>>) {
        let mut buf = *block.get_in();
        encrypt_block(self.0, &mut buf);
        *block.get_out() = buf;
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
        let mut buf = *block.get_in();
        decrypt_block(self.0, &mut buf);
        *block.get_out() = buf;
    }
}
