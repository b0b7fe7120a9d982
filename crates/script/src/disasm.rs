//! Script disassembly to opcode or ASM token strings.

use txkit_primitives::hex::{bytes_from_hex, bytes_to_hex, HexError};

use crate::opcodes::{opcode_name, OP_PUSHDATA1, OP_PUSHDATA2};
use crate::push::{decode_unit, ScriptError};

/// Sentinel returned in place of a token stream when a script does not
/// decode; the result is never a partial token list.
pub const SCRIPT_DECODE_FAILED: &str = "[SCRIPT_DECODE_FAILED]";

/// Render a script as space-separated tokens. In `asm` mode pushes carry
/// their payload hex; otherwise only the push length is shown.
pub fn decode_script(script: &[u8], asm: bool) -> String {
    match decode_tokens(script, asm) {
        Ok(tokens) => tokens.join(" "),
        Err(err) => {
            txkit_log::log_debug!("script decode failed ({err}): {}", bytes_to_hex(script));
            String::from(SCRIPT_DECODE_FAILED)
        }
    }
}

/// Render a hex-encoded script as space-separated tokens.
pub fn decode_script_hex(script: &str, asm: bool) -> Result<String, HexError> {
    Ok(decode_script(&bytes_from_hex(script)?, asm))
}

fn decode_tokens(script: &[u8], asm: bool) -> Result<Vec<String>, ScriptError> {
    let mut cursor = 0usize;
    let mut tokens = Vec::new();
    while cursor < script.len() {
        let opcode = script[cursor];
        let (_, payload, consumed) = decode_unit(script, cursor)?;
        match payload {
            Some(data) => {
                let len = data.len();
                if asm {
                    let form = match opcode {
                        0x01..=0x4b => "OP_PUSHBYTES",
                        OP_PUSHDATA1 => "OP_PUSHDATA1",
                        OP_PUSHDATA2 => "OP_PUSHDATA2",
                        _ => "OP_PUSHDATA4",
                    };
                    tokens.push(format!("{form}[{len}]"));
                    tokens.push(bytes_to_hex(data));
                } else if (0x01..=0x4b).contains(&opcode) {
                    tokens.push(format!("[{len}]"));
                } else {
                    let name = opcode_name(opcode).ok_or(ScriptError::UnknownOpcode(opcode))?;
                    tokens.push(String::from(name));
                    tokens.push(format!("[{len}]"));
                }
            }
            None => {
                let name = opcode_name(opcode).ok_or(ScriptError::UnknownOpcode(opcode))?;
                tokens.push(String::from(name));
            }
        }
        cursor += consumed;
    }
    Ok(tokens)
}
