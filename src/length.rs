//! RFC 3610 §2.2 associated-data length-prefix encoding.

/// Selects which marker octets prefix the 6- and 10-octet associated-data
/// length encodings (the 2-octet encoding has no marker and is identical
/// under both policies).
///
/// RFC 3610 §2.2 specifies distinct markers for each case: `0xFFFE` for the
/// 6-octet (32-bit length) encoding and `0xFFFF` for the 10-octet (64-bit
/// length) encoding. The Stanford JavaScript Crypto Library "ccm" mode this
/// crate interoperates with instead emits the single constant `0xFEFF` for
/// both cases. Since the interoperability layer this crate serves is the
/// primary consumer, [`AadLengthPolicy::SjclCompatible`] is the default;
/// construct a context with [`AadLengthPolicy::Rfc3610Strict`] for
/// standards-compliant output instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AadLengthPolicy {
    /// Emits `0xFEFF` for both the 6- and 10-octet encodings, matching the
    /// SJCL "ccm" mode.
    SjclCompatible,
    /// Emits `0xFFFE` (6-octet) / `0xFFFF` (10-octet) as RFC 3610 §2.2
    /// specifies.
    Rfc3610Strict,
}

impl Default for AadLengthPolicy {
    fn default() -> Self {
        AadLengthPolicy::SjclCompatible
    }
}

/// Encodes the length prefix for `len` octets of associated data into the
/// first bytes of `out`, returning the number of octets written (2, 6, or
/// 10 per the table in RFC 3610 §2.2).
pub(crate) fn encode_aad_length(len: u64, policy: AadLengthPolicy, out: &mut [u8; 10]) -> usize {
    if len < 0xFF00 {
        out[..2].copy_from_slice(&(len as u16).to_be_bytes());
        2
    } else if len <= u32::MAX as u64 {
        let marker: u16 = match policy {
            AadLengthPolicy::SjclCompatible => 0xFEFF,
            AadLengthPolicy::Rfc3610Strict => 0xFFFE,
        };
        out[..2].copy_from_slice(&marker.to_be_bytes());
        out[2..6].copy_from_slice(&(len as u32).to_be_bytes());
        6
    } else {
        let marker: u16 = match policy {
            AadLengthPolicy::SjclCompatible => 0xFEFF,
            AadLengthPolicy::Rfc3610Strict => 0xFFFF,
        };
        out[..2].copy_from_slice(&marker.to_be_bytes());
        out[2..10].copy_from_slice(&len.to_be_bytes());
        10
    }
}
