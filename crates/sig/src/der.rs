//! Strict DER signature envelope validation and codec.
//!
//! Layout: `0x30 <total-len> 0x02 <r-len> <r> 0x02 <s-len> <s> <sighash>`.
//! The trailing sighash byte is counted by the outer length accounting but
//! is not part of either integer. `r` and `s` are big-endian positive
//! integers in their shortest encoding: no leading zero byte unless the
//! next byte would otherwise set the sign bit.

use txkit_primitives::hex::bytes_from_hex;

/// The structural rule a signature violated. Checks run in a fixed order
/// and the first violation terminates evaluation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DerError {
    TotalLength,
    CompoundTag,
    EnvelopeLength,
    RLength,
    ComponentLengths,
    RIntegerTag,
    REmpty,
    RNegative,
    RPadding,
    SIntegerTag,
    SEmpty,
    SNegative,
    SPadding,
}

impl std::fmt::Display for DerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DerError::TotalLength => write!(f, "signature length outside 9..=73"),
            DerError::CompoundTag => write!(f, "signature does not start with a compound tag"),
            DerError::EnvelopeLength => write!(f, "declared length does not cover the signature"),
            DerError::RLength => write!(f, "r length leaves no room for s"),
            DerError::ComponentLengths => {
                write!(f, "r and s lengths do not add up to the signature length")
            }
            DerError::RIntegerTag => write!(f, "r is not tagged as an integer"),
            DerError::REmpty => write!(f, "r is zero-length"),
            DerError::RNegative => write!(f, "r is negative"),
            DerError::RPadding => write!(f, "r has a redundant leading zero byte"),
            DerError::SIntegerTag => write!(f, "s is not tagged as an integer"),
            DerError::SEmpty => write!(f, "s is zero-length"),
            DerError::SNegative => write!(f, "s is negative"),
            DerError::SPadding => write!(f, "s has a redundant leading zero byte"),
        }
    }
}

impl std::error::Error for DerError {}

fn check_encoding(sig: &[u8]) -> Result<(usize, usize), DerError> {
    let length = sig.len();
    if !(9..=73).contains(&length) {
        return Err(DerError::TotalLength);
    }
    if sig[0] != 0x30 {
        return Err(DerError::CompoundTag);
    }
    if sig[1] as usize != length - 3 {
        return Err(DerError::EnvelopeLength);
    }
    let len_r = sig[3] as usize;
    if 5 + len_r >= length {
        return Err(DerError::RLength);
    }
    let len_s = sig[5 + len_r] as usize;
    if len_r + len_s + 7 != length {
        return Err(DerError::ComponentLengths);
    }
    if sig[2] != 0x02 {
        return Err(DerError::RIntegerTag);
    }
    if len_r == 0 {
        return Err(DerError::REmpty);
    }
    if sig[4] & 0x80 != 0 {
        return Err(DerError::RNegative);
    }
    if len_r > 1 && sig[4] == 0x00 && sig[5] & 0x80 == 0 {
        return Err(DerError::RPadding);
    }
    if sig[len_r + 4] != 0x02 {
        return Err(DerError::SIntegerTag);
    }
    if len_s == 0 {
        return Err(DerError::SEmpty);
    }
    if sig[len_r + 6] & 0x80 != 0 {
        return Err(DerError::SNegative);
    }
    if len_s > 1 && sig[len_r + 6] == 0x00 && sig[len_r + 7] & 0x80 == 0 {
        return Err(DerError::SPadding);
    }
    Ok((len_r, len_s))
}

/// Whether a signature (with its trailing sighash byte) satisfies every
/// structural rule of the strict encoding.
pub fn is_valid_signature_encoding(sig: &[u8]) -> bool {
    check_encoding(sig).is_ok()
}

/// Hex-string form of [`is_valid_signature_encoding`]. A string that is not
/// valid hex is not a valid encoding.
pub fn is_valid_signature_encoding_hex(sig: &str) -> bool {
    match bytes_from_hex(sig) {
        Ok(raw) => is_valid_signature_encoding(&raw),
        Err(_) => false,
    }
}

/// Slice the raw `r` and `s` component bytes out of a strict signature.
/// The bytes are returned exactly as encoded, sign-padding included, so
/// [`encode_signature`] reproduces the input byte-for-byte.
pub fn parse_signature(sig: &[u8]) -> Result<(Vec<u8>, Vec<u8>), DerError> {
    let (len_r, len_s) = check_encoding(sig)?;
    let r = sig[4..4 + len_r].to_vec();
    let s = sig[len_r + 6..len_r + 6 + len_s].to_vec();
    Ok((r, s))
}

/// Assemble the signature envelope from raw component bytes and a sighash
/// suffix. The caller is responsible for the components being minimal.
pub fn encode_signature(r: &[u8], s: &[u8], sighash: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(r.len() + s.len() + 7);
    out.push(0x30);
    out.push((r.len() + s.len() + 4) as u8);
    out.push(0x02);
    out.push(r.len() as u8);
    out.extend_from_slice(r);
    out.push(0x02);
    out.push(s.len() as u8);
    out.extend_from_slice(s);
    out.push(sighash);
    out
}
