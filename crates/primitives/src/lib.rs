//! Digest, hex, and address-seam primitives shared by the txkit crates.

pub mod address;
pub mod hash;
pub mod hex;

pub use address::{AddressEncoder, Network};
pub use hash::{hash160, sha256};
pub use hex::{bytes_from_hex, bytes_to_hex, HexError};
