//! Field-name contract for the Stanford JavaScript Crypto Library "ccm"
//! JSON envelope.
//!
//! This module intentionally contains no JSON, base64, or PBKDF2 code —
//! those are peripheral concerns owned by the surrounding layer. It
//! exists only so a JSON layer built against this crate shares a single,
//! tested field-name contract with the core instead of re-deriving the
//! envelope shape from the SJCL documentation each time.

use alloc::string::String;
use alloc::vec::Vec;
use core::convert::TryFrom;

/// The decoded fields of an SJCL "ccm" envelope.
///
/// All binary fields (`iv`, `adata`, `salt`, `ct`) are already base64-
/// decoded byte buffers; base64 transcoding happens in the surrounding
/// layer, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SjclCcmParams {
    /// Initialization vector / nonce, pre-truncation.
    pub iv: Vec<u8>,
    /// Envelope format version. SJCL emits `1`.
    pub v: u32,
    /// PBKDF2 iteration count used to derive the key (consumed, not
    /// performed, by this crate).
    pub iter: u32,
    /// Key size in bits.
    pub ks: u16,
    /// Tag size in bits; must be a multiple of 8 and, once divided by 8,
    /// a valid CCM tag size.
    pub ts: u16,
    /// Always `"ccm"` for this envelope.
    pub mode: String,
    /// Associated data, already decoded.
    pub adata: Vec<u8>,
    /// Always `"aes"` for this envelope.
    pub cipher: String,
    /// PBKDF2 salt.
    pub salt: Vec<u8>,
    /// Ciphertext (`encrypted_plaintext || tag`), already decoded.
    pub ct: Vec<u8>,
}

impl SjclCcmParams {
    /// The CCM tag size in octets implied by `ts`, or `None` if `ts` is
    /// not a multiple of 8.
    pub fn tag_size_octets(&self) -> Option<u8> {
        if self.ts % 8 != 0 {
            return None;
        }
        u8::try_from(self.ts / 8).ok()
    }
}
