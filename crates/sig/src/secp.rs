use std::sync::OnceLock;

use secp256k1::{All, Secp256k1};

static SECP256K1: OnceLock<Secp256k1<All>> = OnceLock::new();

pub(crate) fn secp256k1_context() -> &'static Secp256k1<All> {
    SECP256K1.get_or_init(Secp256k1::new)
}
