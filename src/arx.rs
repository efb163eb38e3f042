use crate::consts::LEA_RK_WORDS;

/// The scalar LEA encryption round.
///
/// Each output word mixes two adjacent state words, whitened by the round
/// key, with a modular addition followed by a fixed rotation.
#[inline(always)]
pub(crate) fn enc_round(x: &mut [u32; 4], rk: &[u32; LEA_RK_WORDS]) {
    let x0 = ((x[0] ^ rk[0]).wrapping_add(x[1] ^ rk[1])).rotate_left(9);
    let x1 = ((x[1] ^ rk[2]).wrapping_add(x[2] ^ rk[3])).rotate_right(5);
    let x2 = ((x[2] ^ rk[4]).wrapping_add(x[3] ^ rk[5])).rotate_right(3);
    *x = [x0, x1, x2, x[0]];
}

/// The scalar LEA decryption round, the exact inverse of [`enc_round`]
/// under the same round key.
#[inline(always)]
pub(crate) fn dec_round(x: &mut [u32; 4], rk: &[u32; LEA_RK_WORDS]) {
    let x0 = x[3];
    let x1 = (x[0].rotate_right(9).wrapping_sub(x0 ^ rk[0])) ^ rk[1];
    let x2 = (x[1].rotate_left(5).wrapping_sub(x1 ^ rk[2])) ^ rk[3];
    let x3 = (x[2].rotate_left(3).wrapping_sub(x2 ^ rk[4])) ^ rk[5];
    *x = [x0, x1, x2, x3];
}
