//! Sign/verify/recover byte packaging over the secp256k1 backend.

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId, Signature};
use secp256k1::{Message, PublicKey, SecretKey};
use txkit_primitives::hex::bytes_to_hex;

use crate::secp::secp256k1_context;

#[derive(Debug)]
pub enum EcdsaError {
    SignatureFormat,
    KeyFormat,
    DigestFormat,
    RecoveryId,
    Backend(secp256k1::Error),
}

impl std::fmt::Display for EcdsaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EcdsaError::SignatureFormat => write!(f, "signature format decode failed"),
            EcdsaError::KeyFormat => write!(f, "key format error"),
            EcdsaError::DigestFormat => write!(f, "message digest must be 32 bytes"),
            EcdsaError::RecoveryId => write!(f, "recovery id outside 0..=3"),
            EcdsaError::Backend(err) => write!(f, "secp256k1 backend error: {err}"),
        }
    }
}

impl std::error::Error for EcdsaError {}

/// Sign a 32-byte message digest, returning the DER-encoded signature
/// (without a sighash suffix).
pub fn sign_message(msg: &[u8], secret_key: &[u8]) -> Result<Vec<u8>, EcdsaError> {
    let secret = SecretKey::from_slice(secret_key).map_err(|_| EcdsaError::KeyFormat)?;
    let digest = Message::from_digest_slice(msg).map_err(|_| EcdsaError::DigestFormat)?;
    let signature = secp256k1_context().sign_ecdsa(&digest, &secret);
    Ok(signature.serialize_der().to_vec())
}

/// Sign a 32-byte message digest recoverably, returning the 64-byte compact
/// signature and its recovery id.
pub fn sign_message_recoverable(
    msg: &[u8],
    secret_key: &[u8],
) -> Result<(Vec<u8>, i32), EcdsaError> {
    let secret = SecretKey::from_slice(secret_key).map_err(|_| EcdsaError::KeyFormat)?;
    let digest = Message::from_digest_slice(msg).map_err(|_| EcdsaError::DigestFormat)?;
    let signature = secp256k1_context().sign_ecdsa_recoverable(&digest, &secret);
    let (rec_id, bytes) = signature.serialize_compact();
    Ok((bytes.to_vec(), rec_id.to_i32()))
}

/// Verify a DER signature over a 32-byte digest. `Ok(false)` means the
/// signature is well-formed but does not verify; malformed inputs are
/// reported as distinct errors.
pub fn verify_signature(sig: &[u8], pub_key: &[u8], msg: &[u8]) -> Result<bool, EcdsaError> {
    let signature = Signature::from_der(sig).map_err(|_| {
        txkit_log::log_debug!("invalid DER signature (len {}): {}", sig.len(), bytes_to_hex(sig));
        EcdsaError::SignatureFormat
    })?;
    let pubkey = PublicKey::from_slice(pub_key).map_err(|_| EcdsaError::KeyFormat)?;
    let digest = Message::from_digest_slice(msg).map_err(|_| EcdsaError::DigestFormat)?;
    Ok(secp256k1_context()
        .verify_ecdsa(&digest, &signature, &pubkey)
        .is_ok())
}

/// Recover the signing public key from a 64-byte compact signature and a
/// 32-byte digest. `Ok(None)` means the signature is well-formed but no key
/// could be recovered for that recovery id.
pub fn recover_public_key(
    sig: &[u8],
    msg: &[u8],
    rec_id: i32,
    compressed: bool,
) -> Result<Option<Vec<u8>>, EcdsaError> {
    let rec_id = RecoveryId::from_i32(rec_id).map_err(|_| EcdsaError::RecoveryId)?;
    let signature =
        RecoverableSignature::from_compact(sig, rec_id).map_err(|_| EcdsaError::SignatureFormat)?;
    let digest = Message::from_digest_slice(msg).map_err(|_| EcdsaError::DigestFormat)?;
    match secp256k1_context().recover_ecdsa(&digest, &signature) {
        Ok(pubkey) => {
            if compressed {
                Ok(Some(pubkey.serialize().to_vec()))
            } else {
                Ok(Some(pubkey.serialize_uncompressed().to_vec()))
            }
        }
        Err(secp256k1::Error::InvalidSignature) => Ok(None),
        Err(err) => Err(EcdsaError::Backend(err)),
    }
}
