//! CBC-MAC accumulation over a 128-bit block cipher.
//!
//! No cryptographic padding (e.g. PKCS#7) is used anywhere in this module;
//! the final short block of any CBC-MAC input is zero-padded via a zeroed
//! 16-byte scratch block.

use aead::generic_array::{typenum::U16, GenericArray};
use aes::block_cipher_trait::BlockCipher;
use zeroize::Zeroize;

/// XORs `a` and `b` component-wise into `dst`. All three ranges must have
/// equal length.
pub(crate) fn xor_into(dst: &mut [u8], a: &[u8], b: &[u8]) {
    debug_assert_eq!(dst.len(), a.len());
    debug_assert_eq!(dst.len(), b.len());
    for ((d, x), y) in dst.iter_mut().zip(a).zip(b) {
        *d = x ^ y;
    }
}

/// The running 16-byte CBC-MAC register used for a single `seal`/`open`
/// call.
///
/// Transient: created fresh per call and zeroized on drop, since it is
/// derived from key and plaintext material.
pub(crate) struct MacState(GenericArray<u8, U16>);

impl MacState {
    /// Initializes the accumulator from an already block-cipher-encrypted
    /// B_0 block.
    pub(crate) fn from_encrypted_block0(block0: GenericArray<u8, U16>) -> Self {
        MacState(block0)
    }

    /// CBC-MAC-steps `data` into the accumulator, encrypting successive
    /// 16-byte blocks with `cipher`, zero-padding the final short block.
    pub(crate) fn update<C: BlockCipher<BlockSize = U16>>(&mut self, cipher: &C, data: &[u8]) {
        for chunk in data.chunks(16) {
            let mut block = GenericArray::<u8, U16>::default();
            block[..chunk.len()].copy_from_slice(chunk);
            let mut next = GenericArray::<u8, U16>::default();
            xor_into(next.as_mut_slice(), self.0.as_slice(), block.as_slice());
            self.0 = next;
            cipher.encrypt_block(&mut self.0);
        }
    }

    /// The current accumulator value: `T` before tag masking, or the raw
    /// MAC used to verify an incoming tag.
    pub(crate) fn tag(&self) -> &GenericArray<u8, U16> {
        &self.0
    }
}

impl Drop for MacState {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_into_matches_manual_xor() {
        let a = [0x0fu8, 0xf0, 0xaa, 0x55];
        let b = [0xffu8, 0xff, 0x00, 0xff];
        let mut dst = [0u8; 4];
        xor_into(&mut dst, &a, &b);
        assert_eq!(dst, [0xf0, 0x0f, 0xaa, 0xaa]);
    }
}
