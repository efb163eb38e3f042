// --- Security Parameter Abstraction ---

/// Key-size parameters for a LEA variant.
pub trait LeaVariant: Clone {
    /// Key size type.
    type KeySize: cipher::generic_array::ArrayLength<u8>;
    const ROUNDS: usize;
    const NAME: &'static str;
}

/// LEA with a 128-bit key.
#[derive(Clone)]
pub struct Key128;
impl LeaVariant for Key128 {
    type KeySize = cipher::consts::U16;
    const ROUNDS: usize = 24;
    const NAME: &'static str = "LEA-128";
}

/// LEA with a 192-bit key.
#[derive(Clone)]
pub struct Key192;
impl LeaVariant for Key192 {
    type KeySize = cipher::consts::U24;
    const ROUNDS: usize = 28;
    const NAME: &'static str = "LEA-192";
}

/// LEA with a 256-bit key.
#[derive(Clone)]
pub struct Key256;
impl LeaVariant for Key256 {
    type KeySize = cipher::consts::U32;
    const ROUNDS: usize = 32;
    const NAME: &'static str = "LEA-256";
}

/// Output-length parameters for an LSH-512 variant. Each output length has
/// its own initialization vector.
pub trait LshVariant: Clone {
    /// Digest size type.
    type OutputSize: digest::generic_array::ArrayLength<u8> + 'static;
    const OUTPUT_BITS: usize;
    const IV: [u64; 16];
    const NAME: &'static str;
}

/// Full 512-bit output.
#[derive(Clone)]
pub struct Out512;
impl LshVariant for Out512 {
    type OutputSize = digest::consts::U64;
    const OUTPUT_BITS: usize = 512;
    const IV: [u64; 16] = crate::consts::IV512;
    const NAME: &'static str = "LSH-512";
}

/// 384-bit output.
#[derive(Clone)]
pub struct Out384;
impl LshVariant for Out384 {
    type OutputSize = digest::consts::U48;
    const OUTPUT_BITS: usize = 384;
    const IV: [u64; 16] = crate::consts::IV384;
    const NAME: &'static str = "LSH-384";
}

/// 256-bit output.
#[derive(Clone)]
pub struct Out256;
impl LshVariant for Out256 {
    type OutputSize = digest::consts::U32;
    const OUTPUT_BITS: usize = 256;
    const IV: [u64; 16] = crate::consts::IV256;
    const NAME: &'static str = "LSH-512-256";
}

/// 224-bit output.
#[derive(Clone)]
pub struct Out224;
impl LshVariant for Out224 {
    type OutputSize = digest::consts::U28;
    const OUTPUT_BITS: usize = 224;
    const IV: [u64; 16] = crate::consts::IV224;
    const NAME: &'static str = "LSH-512-224";
}
