//! Script parsing, classification, disassembly, and rewriting.

pub mod disasm;
pub mod opcodes;
pub mod push;
pub mod standard;
pub mod subscript;

pub use disasm::{decode_script, decode_script_hex, SCRIPT_DECODE_FAILED};
pub use push::{decode_unit, encode_push, unit_len, ScriptError};
pub use standard::{
    get_multisig_public_keys, parse_script, parse_script_hex, public_key_to_pubkey_script,
    script_to_address, script_to_hash, ParsedScript, ScriptType,
};
pub use subscript::{delete_from_script, delete_from_script_hex};
