//! Standard script classification utilities.

use txkit_primitives::hash::{hash160, sha256};
use txkit_primitives::hex::{bytes_from_hex, HexError};
use txkit_primitives::{AddressEncoder, Network};

use crate::opcodes::{
    OP_CHECKMULTISIG, OP_CHECKMULTISIGVERIFY, OP_CHECKSIG, OP_CHECKSIGVERIFY, OP_DUP, OP_EQUAL,
    OP_EQUALVERIFY, OP_HASH160, OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4, OP_RETURN,
};
use crate::push::{decode_unit, encode_push, unit_len};

/// Classification of a script-pubkey, carrying the payload each template
/// exposes: a destination hash, null-data payload, or the raw script when no
/// address form is recognized.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScriptType {
    Empty,
    P2Pkh { address_hash: [u8; 20] },
    P2Sh { address_hash: [u8; 20] },
    P2Wpkh { address_hash: [u8; 20] },
    P2Wsh { address_hash: [u8; 32] },
    PubKey { address_hash: [u8; 20] },
    NullData { data: Vec<u8> },
    NullDataNonStandard { script: Vec<u8> },
    Multisig { script: Vec<u8>, pub_keys: u32 },
    NonStandard { script: Vec<u8> },
}

impl ScriptType {
    pub fn name(&self) -> &'static str {
        match self {
            ScriptType::Empty => "EMPTY",
            ScriptType::P2Pkh { .. } => "P2PKH",
            ScriptType::P2Sh { .. } => "P2SH",
            ScriptType::P2Wpkh { .. } => "P2WPKH",
            ScriptType::P2Wsh { .. } => "P2WSH",
            ScriptType::PubKey { .. } => "PUBKEY",
            ScriptType::NullData { .. } => "NULL_DATA",
            ScriptType::NullDataNonStandard { .. } => "NULL_DATA_NON_STANDARD",
            ScriptType::Multisig { .. } => "MULTISIG",
            ScriptType::NonStandard { .. } => "NON_STANDARD",
        }
    }

    /// Legacy numeric type code. Empty scripts share the NON_STANDARD code.
    pub fn n_type(&self) -> u8 {
        match self {
            ScriptType::P2Pkh { .. } => 0,
            ScriptType::P2Sh { .. } => 1,
            ScriptType::PubKey { .. } => 2,
            ScriptType::NullData { .. } => 3,
            ScriptType::Multisig { .. } => 4,
            ScriptType::P2Wpkh { .. } => 5,
            ScriptType::P2Wsh { .. } => 6,
            ScriptType::Empty | ScriptType::NonStandard { .. } => 7,
            ScriptType::NullDataNonStandard { .. } => 8,
        }
    }
}

/// A classified script together with the number of signatures it requires.
/// `req_sigs` is `None` when the count cannot be known at this layer
/// (P2SH and P2WSH hide the redeem script).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedScript {
    pub script_type: ScriptType,
    pub req_sigs: Option<u32>,
}

/// Classify a script-pubkey and count its required signatures. `segwit`
/// enables recognition of the witness-program templates.
pub fn parse_script(script: &[u8], segwit: bool) -> ParsedScript {
    if script.is_empty() {
        return ParsedScript {
            script_type: ScriptType::Empty,
            req_sigs: Some(0),
        };
    }
    let l = script.len();

    if segwit {
        if l == 22 && script[0] == 0 {
            let mut address_hash = [0u8; 20];
            address_hash.copy_from_slice(&script[2..22]);
            return ParsedScript {
                script_type: ScriptType::P2Wpkh { address_hash },
                req_sigs: Some(1),
            };
        }
        if l == 34 && script[0] == 0 {
            let mut address_hash = [0u8; 32];
            address_hash.copy_from_slice(&script[2..34]);
            return ParsedScript {
                script_type: ScriptType::P2Wsh { address_hash },
                req_sigs: None,
            };
        }
    }

    // Legacy templates match on length and the boundary opcodes only; the
    // interior push markers are deliberately not checked.
    if l == 25
        && script[0] == OP_DUP
        && script[1] == OP_HASH160
        && script[23] == OP_EQUALVERIFY
        && script[24] == OP_CHECKSIG
    {
        let mut address_hash = [0u8; 20];
        address_hash.copy_from_slice(&script[3..23]);
        return ParsedScript {
            script_type: ScriptType::P2Pkh { address_hash },
            req_sigs: Some(1),
        };
    }
    if l == 23 && script[0] == OP_HASH160 && script[22] == OP_EQUAL {
        let mut address_hash = [0u8; 20];
        address_hash.copy_from_slice(&script[2..22]);
        return ParsedScript {
            script_type: ScriptType::P2Sh { address_hash },
            req_sigs: None,
        };
    }
    if (l == 67 || l == 35) && script[l - 1] == OP_CHECKSIG {
        return ParsedScript {
            script_type: ScriptType::PubKey {
                address_hash: hash160(&script[1..l - 1]),
            },
            req_sigs: Some(1),
        };
    }

    if script[0] == OP_RETURN {
        return parse_null_data(script);
    }

    if (0x51..=0x60).contains(&script[0])
        && script[l - 1] == OP_CHECKMULTISIG
        && (0x51..=0x60).contains(&script[l - 2])
        && script[l - 2] >= script[0]
    {
        if let Some(parsed) = parse_bare_multisig(script) {
            return parsed;
        }
    }

    generic_walk(script)
}

/// Classify from a hex-encoded script.
pub fn parse_script_hex(script: &str, segwit: bool) -> Result<ParsedScript, HexError> {
    Ok(parse_script(&bytes_from_hex(script)?, segwit))
}

fn parse_null_data(script: &[u8]) -> ParsedScript {
    let l = script.len();
    let script_type = if l == 1 {
        ScriptType::NullData { data: Vec::new() }
    } else if script[1] < OP_PUSHDATA1 && script[1] as usize == l - 2 {
        ScriptType::NullData {
            data: script[2..].to_vec(),
        }
    } else if script[1] == OP_PUSHDATA1
        && l > 2
        && script[2] as usize == l - 3
        && script[2] <= 80
    {
        ScriptType::NullData {
            data: script[3..].to_vec(),
        }
    } else {
        ScriptType::NullDataNonStandard {
            script: script.to_vec(),
        }
    };
    ParsedScript {
        script_type,
        req_sigs: Some(0),
    }
}

/// Strict structural match for `OP_m <key>*n OP_n OP_CHECKMULTISIG`: every
/// interior unit must be a nonzero raw push and the push count must equal
/// `n` exactly, otherwise the caller falls through to the generic walk.
fn parse_bare_multisig(script: &[u8]) -> Option<ParsedScript> {
    let l = script.len();
    let mut count = 0u32;
    let mut cursor = 1usize;
    while l - 2 > cursor {
        let opcode = script[cursor];
        if (0x01..=0x4b).contains(&opcode) {
            cursor += opcode as usize;
            count += 1;
        } else {
            return None;
        }
        cursor += 1;
    }
    if count != u32::from(script[l - 2] - 80) {
        return None;
    }
    Some(ParsedScript {
        script_type: ScriptType::Multisig {
            script: script.to_vec(),
            pub_keys: count,
        },
        req_sigs: Some(u32::from(script[0] - 80)),
    })
}

/// Best-effort signature tally over an unrecognized script. Tracks the most
/// recent candidate multisig threshold `n` and push count `m`; a doubled
/// small-integer sighting arms a two-step countdown that lets the very next
/// CHECKMULTISIG charge `n` instead of the conservative 20. A push whose
/// declared length overruns the buffer ends the walk with the tally so far.
fn generic_walk(script: &[u8]) -> ParsedScript {
    let l = script.len();
    let mut cursor = 0usize;
    let mut n = 0u32;
    let mut m = 0u32;
    let mut last = 0u8;
    let mut req_sigs = 0u32;

    while cursor < l {
        let opcode = script[cursor];
        match opcode {
            0x51..=0x60 => {
                let value = u32::from(opcode - 80);
                if n == 0 {
                    n = value;
                } else if m == 0 {
                    n = value;
                } else if n > m {
                    n = value;
                    m = 0;
                } else if m == value {
                    last = if last != 0 { 0 } else { 2 };
                }
            }
            0x01..=0x4b | OP_PUSHDATA1 | OP_PUSHDATA2 | OP_PUSHDATA4 => {
                let Ok(len) = unit_len(script, cursor) else {
                    break;
                };
                cursor += len - 1;
                m += 1;
                if m > 16 {
                    n = 0;
                    m = 0;
                }
            }
            OP_CHECKSIG | OP_CHECKSIGVERIFY => {
                req_sigs += 1;
                n = 0;
                m = 0;
            }
            OP_CHECKMULTISIG | OP_CHECKMULTISIGVERIFY => {
                req_sigs += if last != 0 { n } else { 20 };
                n = 0;
                m = 0;
            }
            _ => {
                n = 0;
                m = 0;
            }
        }
        if last != 0 {
            last -= 1;
        }
        cursor += 1;
    }

    ParsedScript {
        script_type: ScriptType::NonStandard {
            script: script.to_vec(),
        },
        req_sigs: Some(req_sigs),
    }
}

/// Build the `<push key> OP_CHECKSIG` output form for a serialized key.
pub fn public_key_to_pubkey_script(key: &[u8]) -> Vec<u8> {
    let mut script = encode_push(key);
    script.push(OP_CHECKSIG);
    script
}

/// HASH160 of a script, or SHA256 when hashing for a witness program.
pub fn script_to_hash(script: &[u8], witness: bool) -> Vec<u8> {
    if witness {
        sha256(script).to_vec()
    } else {
        hash160(script).to_vec()
    }
}

/// Classify a script and encode its destination hash through the supplied
/// address encoder. Returns `None` when the script has no address form.
pub fn script_to_address<E: AddressEncoder>(
    script: &[u8],
    network: Network,
    encoder: &E,
) -> Option<String> {
    let parsed = parse_script(script, true);
    match parsed.script_type {
        ScriptType::P2Pkh { address_hash } => {
            Some(encoder.encode_address(&address_hash, network, false, None))
        }
        ScriptType::P2Sh { address_hash } => {
            Some(encoder.encode_address(&address_hash, network, true, None))
        }
        ScriptType::P2Wpkh { address_hash } => {
            Some(encoder.encode_address(&address_hash, network, false, Some(0)))
        }
        ScriptType::P2Wsh { address_hash } => {
            Some(encoder.encode_address(&address_hash, network, true, Some(0)))
        }
        ScriptType::PubKey { address_hash } => {
            Some(encoder.encode_address(&address_hash, network, false, None))
        }
        _ => None,
    }
}

/// Collect the push payloads of a bare multisig script (the embedded keys).
pub fn get_multisig_public_keys(script: &[u8]) -> Vec<Vec<u8>> {
    let mut keys = Vec::new();
    let mut cursor = 0usize;
    while cursor < script.len() {
        let Ok((_, payload, consumed)) = decode_unit(script, cursor) else {
            break;
        };
        if let Some(data) = payload {
            if !data.is_empty() {
                keys.push(data.to_vec());
            }
        }
        cursor += consumed;
    }
    keys
}
