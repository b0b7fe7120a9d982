use secp256k1::{PublicKey, Secp256k1, SecretKey};
use txkit_sig::der::{encode_signature, is_valid_signature_encoding, parse_signature};
use txkit_sig::ecdsa::{
    recover_public_key, sign_message, sign_message_recoverable, verify_signature, EcdsaError,
};

const SECRET: [u8; 32] = [0x01; 32];
const DIGEST: [u8; 32] = [0x55; 32];

fn public_key() -> PublicKey {
    let secp = Secp256k1::signing_only();
    PublicKey::from_secret_key(&secp, &SecretKey::from_slice(&SECRET).expect("secret"))
}

#[test]
fn signing_produces_a_strictly_encoded_signature() {
    let mut sig = sign_message(&DIGEST, &SECRET).expect("sign");
    sig.push(0x01);
    assert!(is_valid_signature_encoding(&sig));

    let (r, s) = parse_signature(&sig).expect("parse");
    assert_eq!(encode_signature(&r, &s, 0x01), sig);
}

#[test]
fn sign_verify_round_trip() {
    let sig = sign_message(&DIGEST, &SECRET).expect("sign");
    let pubkey = public_key();
    assert!(verify_signature(&sig, &pubkey.serialize(), &DIGEST).expect("verify"));

    let other = [0x66u8; 32];
    assert!(!verify_signature(&sig, &pubkey.serialize(), &other).expect("verify"));
}

#[test]
fn verify_distinguishes_malformed_inputs() {
    let sig = sign_message(&DIGEST, &SECRET).expect("sign");
    let pubkey = public_key().serialize();

    let err = verify_signature(&[0x30, 0x00], &pubkey, &DIGEST).unwrap_err();
    assert!(matches!(err, EcdsaError::SignatureFormat));

    let err = verify_signature(&sig, &[0x00; 33], &DIGEST).unwrap_err();
    assert!(matches!(err, EcdsaError::KeyFormat));

    let err = verify_signature(&sig, &pubkey, &[0x55; 31]).unwrap_err();
    assert!(matches!(err, EcdsaError::DigestFormat));
}

#[test]
fn sign_rejects_invalid_secret_keys() {
    let err = sign_message(&DIGEST, &[0x00; 32]).unwrap_err();
    assert!(matches!(err, EcdsaError::KeyFormat));

    let err = sign_message(&[0x55; 31], &SECRET).unwrap_err();
    assert!(matches!(err, EcdsaError::DigestFormat));
}

#[test]
fn recover_round_trip() {
    let (compact, rec_id) = sign_message_recoverable(&DIGEST, &SECRET).expect("sign");
    let pubkey = public_key();

    let recovered = recover_public_key(&compact, &DIGEST, rec_id, true)
        .expect("recover")
        .expect("key found");
    assert_eq!(recovered, pubkey.serialize().to_vec());

    let recovered = recover_public_key(&compact, &DIGEST, rec_id, false)
        .expect("recover")
        .expect("key found");
    assert_eq!(recovered, pubkey.serialize_uncompressed().to_vec());
}

#[test]
fn recover_rejects_malformed_inputs() {
    let (compact, _) = sign_message_recoverable(&DIGEST, &SECRET).expect("sign");

    let err = recover_public_key(&compact, &DIGEST, 4, true).unwrap_err();
    assert!(matches!(err, EcdsaError::RecoveryId));

    let err = recover_public_key(&compact[..63], &DIGEST, 0, true).unwrap_err();
    assert!(matches!(err, EcdsaError::SignatureFormat));
}
