//! [CCM][1] ([RFC 3610][2]): Counter with CBC-MAC, an
//! [Authenticated Encryption with Associated Data (AEAD)][3] mode built
//! from a 128-bit block cipher.
//!
//! This crate reproduces the Stanford JavaScript Crypto Library (SJCL)
//! "ccm" JSON envelope's nonce auto-truncation behaviour exactly (see
//! [`policy::derived_nonce_len`]), which is the interoperability-critical
//! reason this crate exists: a pure-RFC 3610 CCM implementation that
//! didn't reproduce that quirk would fail to decrypt messages SJCL
//! produced with a short plaintext and a long supplied nonce.
//!
//! The block cipher itself is an external collaborator, consumed through
//! the `aes` crate's [`BlockCipher`](aes::block_cipher_trait::BlockCipher)
//! trait; JSON parsing of SJCL envelopes, base64 transcoding, PBKDF2 key
//! derivation, and file I/O are peripheral and live outside this crate
//! (the [`sjcl`] module only documents the envelope's field-name
//! contract).
//!
//! [1]: https://en.wikipedia.org/wiki/CCM_mode
//! [2]: https://datatracker.ietf.org/doc/html/rfc3610
//! [3]: https://en.wikipedia.org/wiki/Authenticated_encryption

#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

pub use aead;

mod engine;
mod error;
mod length;
mod mac;
pub mod policy;

#[cfg(feature = "alloc")]
pub mod sjcl;

pub use engine::CcmCore;
pub use error::Error;
pub use length::AadLengthPolicy;

/// A `Result` alias for this crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// CCM over AES-128, the pairing this crate's RFC 3610 test vectors
/// exercise.
#[cfg(feature = "aes")]
pub type Aes128Ccm = CcmCore<aes::Aes128>;

/// CCM over AES-256.
#[cfg(feature = "aes")]
pub type Aes256Ccm = CcmCore<aes::Aes256>;
