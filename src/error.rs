//! Error types for the krypto library.

use core::fmt;

/// Errors produced by the krypto primitives.
///
/// Every variant signals a caller contract violation; none of them is
/// transient, so retrying the same call always fails the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Key length (in bytes) is not supported by the algorithm.
    InvalidKeySize(usize),
    /// Buffer length (in bytes) does not hold the blocks the call needs.
    InvalidBlockSize(usize),
    /// Hash input length (in bits) is not a whole number of bytes.
    InvalidDataBitLength(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeySize(len) => write!(f, "invalid key size {len}"),
            Error::InvalidBlockSize(len) => write!(f, "invalid block size {len}"),
            Error::InvalidDataBitLength(bits) => {
                write!(f, "bit level update is not allowed ({bits} bits)")
            }
        }
    }
}

impl core::error::Error for Error {}
