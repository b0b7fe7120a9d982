//! Strict DER signature codec and ECDSA byte packaging.

pub mod der;
pub mod ecdsa;
mod secp;

pub use der::{
    encode_signature, is_valid_signature_encoding, is_valid_signature_encoding_hex,
    parse_signature, DerError,
};
pub use ecdsa::{
    recover_public_key, sign_message, sign_message_recoverable, verify_signature, EcdsaError,
};
