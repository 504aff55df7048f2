//! Eight distinct, non-overlapping error kinds. `AuthenticationFailed` is
//! the only one visible to an adversary and carries no payload, so its
//! presence never leaks which octet of the tag differed or exposes
//! unauthenticated plaintext.

use core::fmt;

/// An error raised by [`crate::CcmCore`] construction, [`crate::CcmCore::seal`],
/// or [`crate::CcmCore::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The block cipher's block size is not 16 octets.
    ///
    /// Unreachable through [`crate::CcmCore::new`], whose `C:
    /// BlockCipher<BlockSize = U16>` bound enforces this at compile time;
    /// the variant exists for API completeness and for callers who
    /// construct a context through type-erased or dynamically dispatched
    /// block ciphers where the block size can only be known at runtime.
    InvalidBlockSize,
    /// The requested tag size is not one of `{4, 6, 8, 10, 12, 14, 16}`.
    TagSizeError,
    /// The requested nonce size is outside `[7, 13]`.
    NonceSizeError,
    /// `seal` observed an effective nonce length incompatible with the
    /// context's `L`.
    InvalidNonceLength,
    /// The plaintext exceeds [`crate::CcmCore::max_length`].
    PlaintextTooLong,
    /// The ciphertext exceeds `max_length() + overhead()`.
    CiphertextTooLong,
    /// The ciphertext is shorter than the tag size.
    CiphertextTooShort,
    /// Tag verification failed during `open`.
    AuthenticationFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::InvalidBlockSize => "block cipher does not have a 16-octet block size",
            Error::TagSizeError => "tag size must be one of 4, 6, 8, 10, 12, 14, 16",
            Error::NonceSizeError => "nonce size must be between 7 and 13 octets",
            Error::InvalidNonceLength => "effective nonce length is incompatible with this context",
            Error::PlaintextTooLong => "plaintext exceeds the maximum length for this context",
            Error::CiphertextTooLong => "ciphertext exceeds the maximum length for this context",
            Error::CiphertextTooShort => "ciphertext is shorter than the tag",
            Error::AuthenticationFailed => "authentication tag did not verify",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for Error {}

impl From<Error> for aead::Error {
    fn from(_: Error) -> Self {
        // aead::Error is deliberately opaque (no variants, no payload) to
        // avoid side-channel leakage; this conversion exists so a CcmCore
        // can be used anywhere an `aead`-ecosystem caller expects its
        // error type, without this crate losing its own richer diagnostics
        // on the direct API.
        aead::Error
    }
}
