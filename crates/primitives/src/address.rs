//! Address-encoding collaborator seam.
//!
//! Turning an address hash into a base58/bech32 string lives outside this
//! workspace; callers supply an implementation of this trait.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Network {
    Mainnet,
    Testnet,
}

pub trait AddressEncoder {
    /// Encode an address hash as a display string. `script_hash` selects the
    /// script-hash address family; `witness_version` is set for witness
    /// programs and `None` for legacy forms.
    fn encode_address(
        &self,
        hash: &[u8],
        network: Network,
        script_hash: bool,
        witness_version: Option<u8>,
    ) -> String;
}
