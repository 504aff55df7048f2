//! The CCM engine: B_0 formatting, CBC-MAC accumulation over associated
//! data and plaintext, CTR-mode encryption keyed by a derived counter
//! block, tag truncation, and constant-time tag verification.

use aead::generic_array::{typenum::U16, GenericArray};
use aes::block_cipher_trait::BlockCipher;
use core::marker::PhantomData;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::error::Error;
use crate::length::{encode_aad_length, AadLengthPolicy};
use crate::mac::{xor_into, MacState};
use crate::policy::{derived_nonce_len, max_length_for_message};

const fn is_valid_tag_size(m: u8) -> bool {
    matches!(m, 4 | 6 | 8 | 10 | 12 | 14 | 16)
}

/// A CCM context over a 128-bit block cipher `C`.
///
/// Logically immutable once constructed: `seal` and `open` never mutate
/// `self`, so a shared `&CcmCore<C>` may be used concurrently from multiple
/// threads provided `C` is itself safe for concurrent single-block
/// encrypts (`C: Sync`). No error or scratch state is cached on the
/// context itself, unlike the Go implementation this crate reproduces the
/// wire behaviour of.
#[derive(Clone)]
pub struct CcmCore<C> {
    cipher: C,
    /// Tag size in octets, one of `{4, 6, 8, 10, 12, 14, 16}`.
    tag_size: u8,
    /// Length-field width in octets, `15 - nonce_size`, in `[2, 8]`.
    l: u8,
    aad_policy: AadLengthPolicy,
    _marker: PhantomData<()>,
}

impl<C> core::fmt::Debug for CcmCore<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CcmCore")
            .field("tag_size", &self.tag_size)
            .field("l", &self.l)
            .field("aad_policy", &self.aad_policy)
            .finish()
    }
}

impl<C> CcmCore<C>
where
    C: BlockCipher<BlockSize = U16>,
{
    /// Constructs a context using the SJCL-compatible associated-data
    /// length-prefix marker (see [`AadLengthPolicy`]).
    pub fn new(cipher: C, tag_size: u8, nonce_size: u8) -> Result<Self, Error> {
        Self::new_with_policy(cipher, tag_size, nonce_size, AadLengthPolicy::default())
    }

    /// Constructs a context with an explicit [`AadLengthPolicy`].
    pub fn new_with_policy(
        cipher: C,
        tag_size: u8,
        nonce_size: u8,
        aad_policy: AadLengthPolicy,
    ) -> Result<Self, Error> {
        if !is_valid_tag_size(tag_size) {
            return Err(Error::TagSizeError);
        }
        if !(7..=13).contains(&nonce_size) {
            return Err(Error::NonceSizeError);
        }
        Ok(CcmCore {
            cipher,
            tag_size,
            l: 15 - nonce_size,
            aad_policy,
            _marker: PhantomData,
        })
    }

    /// The nonce length this context was constructed for, `15 - L`.
    pub fn nonce_size(&self) -> usize {
        (15 - self.l) as usize
    }

    /// The ciphertext expansion: the tag size in octets.
    pub fn overhead(&self) -> usize {
        self.tag_size as usize
    }

    /// The maximum plaintext length this context accepts, per
    /// [`crate::policy::max_length_for_message`].
    pub fn max_length(&self) -> usize {
        let max = max_length_for_message(self.l, self.tag_size);
        if max > usize::MAX as u64 {
            usize::MAX
        } else {
            max as usize
        }
    }

    /// Encrypts and authenticates `plaintext` under `nonce` and `aad`,
    /// returning `encrypted_plaintext || tag`.
    #[cfg(feature = "alloc")]
    pub fn seal(
        &self,
        nonce: &[u8],
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<alloc::vec::Vec<u8>, Error> {
        let tag_size = self.tag_size as usize;
        let mut buffer = alloc::vec::Vec::with_capacity(plaintext.len() + tag_size);
        buffer.extend_from_slice(plaintext);
        let tag = self.seal_in_place(nonce, aad, &mut buffer)?;
        buffer.extend_from_slice(&tag[..tag_size]);
        Ok(buffer)
    }

    /// Encrypts `buffer` in place, returning the (untruncated) tag block.
    /// Callers append `tag[..overhead()]` to the ciphertext themselves.
    pub fn seal_in_place(
        &self,
        nonce: &[u8],
        aad: &[u8],
        buffer: &mut [u8],
    ) -> Result<GenericArray<u8, U16>, Error> {
        let effective_nonce_len = derived_nonce_len(buffer.len() as u64);
        let nonce = truncate_nonce(nonce, effective_nonce_len as usize);

        if 15 - effective_nonce_len != self.l {
            return Err(Error::InvalidNonceLength);
        }
        if buffer.len() as u64 > self.max_length() as u64 {
            return Err(Error::PlaintextTooLong);
        }

        let mut block0 = build_block0(nonce, self.l, self.tag_size, buffer.len() as u64, !aad.is_empty());
        self.cipher.encrypt_block(&mut block0);
        let mut mac = MacState::from_encrypted_block0(block0);
        self.hash_aad(&mut mac, aad);
        mac.update(&self.cipher, buffer);

        let mut a0 = build_a0(nonce, self.l);
        let mut mask = a0.clone();
        self.cipher.encrypt_block(&mut mask);

        let mut tag = GenericArray::<u8, U16>::default();
        xor_into(tag.as_mut_slice(), mac.tag().as_slice(), mask.as_slice());

        increment_counter(&mut a0, self.l);
        ctr_apply(&self.cipher, a0, self.l, buffer);

        Ok(tag)
    }

    /// Verifies and decrypts `ciphertext` (`encrypted_plaintext || tag`)
    /// under `nonce` and `aad`, returning the plaintext.
    #[cfg(feature = "alloc")]
    pub fn open(
        &self,
        nonce: &[u8],
        ciphertext: &[u8],
        aad: &[u8],
    ) -> Result<alloc::vec::Vec<u8>, Error> {
        let mut buffer = ciphertext.to_vec();
        let pt_len = self.open_in_place(nonce, aad, &mut buffer)?;
        buffer.truncate(pt_len);
        Ok(buffer)
    }

    /// Verifies and decrypts `buffer` (`encrypted_plaintext || tag`) in
    /// place. On success, `buffer[..returned_len]` holds the plaintext. On
    /// [`Error::AuthenticationFailed`], `buffer` is left fully zeroized so
    /// unauthenticated plaintext is never observable by the caller.
    pub fn open_in_place(&self, nonce: &[u8], aad: &[u8], buffer: &mut [u8]) -> Result<usize, Error> {
        let tag_size = self.tag_size as usize;
        if buffer.len() < tag_size {
            return Err(Error::CiphertextTooShort);
        }
        if buffer.len() as u64 > self.max_length() as u64 + tag_size as u64 {
            return Err(Error::CiphertextTooLong);
        }

        let pt_len = buffer.len() - tag_size;
        // The SJCL-compatible nonce-truncation rule is derived from the
        // plaintext length, not the ciphertext length; this asymmetry with
        // `seal` (no `15 - effective_nonce_len == L` check here) is
        // preserved for interoperability with envelopes that supplied a
        // longer nonce than their effective length.
        let effective_nonce_len = derived_nonce_len(pt_len as u64);
        let nonce = truncate_nonce(nonce, effective_nonce_len as usize);

        let (ct, received_tag) = buffer.split_at_mut(pt_len);

        let mut block0 = build_block0(nonce, self.l, self.tag_size, pt_len as u64, !aad.is_empty());
        self.cipher.encrypt_block(&mut block0);

        let mut a0 = build_a0(nonce, self.l);
        let mut mask = a0.clone();
        self.cipher.encrypt_block(&mut mask);

        let mut ctr = a0.clone();
        increment_counter(&mut ctr, self.l);
        ctr_apply(&self.cipher, ctr, self.l, ct);

        let mut mac = MacState::from_encrypted_block0(block0);
        self.hash_aad(&mut mac, aad);
        mac.update(&self.cipher, ct);

        let mut expected_tag = GenericArray::<u8, U16>::default();
        xor_into(expected_tag.as_mut_slice(), mac.tag().as_slice(), mask.as_slice());

        let authentic = expected_tag[..tag_size].ct_eq(&received_tag[..tag_size]).unwrap_u8() == 1;

        a0.zeroize();
        mask.zeroize();

        if authentic {
            Ok(pt_len)
        } else {
            // Never expose plaintext that failed authentication.
            ct.zeroize();
            received_tag.zeroize();
            Err(Error::AuthenticationFailed)
        }
    }

    /// CBC-MAC-steps the length-prefixed associated data into `mac`, per
    /// RFC 3610 §2.2.
    fn hash_aad(&self, mac: &mut MacState, aad: &[u8]) {
        if aad.is_empty() {
            return;
        }

        let mut prefix = [0u8; 10];
        let prefix_len = encode_aad_length(aad.len() as u64, self.aad_policy, &mut prefix);

        let mut first_block = GenericArray::<u8, U16>::default();
        first_block[..prefix_len].copy_from_slice(&prefix[..prefix_len]);
        let take = core::cmp::min(16 - prefix_len, aad.len());
        first_block[prefix_len..prefix_len + take].copy_from_slice(&aad[..take]);

        mac.update(&self.cipher, &first_block);
        if take < aad.len() {
            mac.update(&self.cipher, &aad[take..]);
        }
    }
}

/// Truncates `nonce` to `len` octets if it is longer; shorter or
/// equal-length nonces pass through unchanged. A caller may supply a
/// longer nonce than the effective length and the engine silently uses
/// only a prefix of it, matching SJCL's own auto-truncation behaviour.
fn truncate_nonce(nonce: &[u8], len: usize) -> &[u8] {
    if nonce.len() > len {
        &nonce[..len]
    } else {
        nonce
    }
}

/// Builds B_0 per RFC 3610 §2.2: `Flags | nonce | length(plaintext)`.
///
/// `nonce` is copied into the block starting at byte 1 for
/// `min(nonce.len(), 15 - l)` octets; any remaining position in the
/// nonce field is left zero. This mirrors a fixed-size array copy and is
/// what makes `open`'s relaxed nonce-length check (no panic on a
/// mismatched effective length) well-defined.
fn build_block0(nonce: &[u8], l: u8, m: u8, msg_len: u64, adata_present: bool) -> GenericArray<u8, U16> {
    let mut b0 = GenericArray::<u8, U16>::default();
    b0[0] = (if adata_present { 0x40 } else { 0 }) | (((m - 2) / 2) << 3) | (l - 1);

    let nonce_field_len = 15 - l as usize;
    let n = core::cmp::min(nonce.len(), nonce_field_len);
    b0[1..1 + n].copy_from_slice(&nonce[..n]);

    let len_bytes = msg_len.to_be_bytes();
    b0[16 - l as usize..].copy_from_slice(&len_bytes[8 - l as usize..]);
    b0
}

/// Builds `A_0` per RFC 3610 §2.3: `[L-1 | nonce | 0...0]`, counter at zero.
fn build_a0(nonce: &[u8], l: u8) -> GenericArray<u8, U16> {
    let mut a0 = GenericArray::<u8, U16>::default();
    a0[0] = l - 1;
    let nonce_field_len = 15 - l as usize;
    let n = core::cmp::min(nonce.len(), nonce_field_len);
    a0[1..1 + n].copy_from_slice(&nonce[..n]);
    a0
}

/// Increments the big-endian counter held in the low `l` octets of
/// `block`, wrapping on overflow (unreachable in practice since `l` and
/// the length caps in [`crate::policy`] bound the number of blocks any
/// message can require).
fn increment_counter(block: &mut GenericArray<u8, U16>, l: u8) {
    let start = 16 - l as usize;
    for byte in block[start..].iter_mut().rev() {
        if *byte == 0xff {
            *byte = 0;
        } else {
            *byte += 1;
            return;
        }
    }
}

/// Standard CTR-mode keystream application: `buffer ^= E_K(counter),
/// E_K(counter+1), ...`, incrementing the low `l` octets of `counter`
/// between blocks.
fn ctr_apply<C: BlockCipher<BlockSize = U16>>(
    cipher: &C,
    mut counter: GenericArray<u8, U16>,
    l: u8,
    buffer: &mut [u8],
) {
    for chunk in buffer.chunks_mut(16) {
        let mut keystream = counter.clone();
        cipher.encrypt_block(&mut keystream);
        for (b, k) in chunk.iter_mut().zip(keystream.iter()) {
            *b ^= k;
        }
        increment_counter(&mut counter, l);
    }
}
