//! Push-data encoding and the shared script-walk primitive.

use crate::opcodes::{OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScriptError {
    TruncatedLength,
    TruncatedPush,
    UnknownOpcode(u8),
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptError::TruncatedLength => write!(f, "push length field past end of script"),
            ScriptError::TruncatedPush => write!(f, "push data past end of script"),
            ScriptError::UnknownOpcode(opcode) => write!(f, "unknown opcode 0x{opcode:02x}"),
        }
    }
}

impl std::error::Error for ScriptError {}

/// Wrap a payload in the shortest push-data form that fits its length.
pub fn encode_push(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 5);
    if data.len() <= 0x4b {
        out.push(data.len() as u8);
    } else if data.len() <= 0xff {
        out.push(OP_PUSHDATA1);
        out.push(data.len() as u8);
    } else if data.len() <= 0xffff {
        out.push(OP_PUSHDATA2);
        out.extend_from_slice(&(data.len() as u16).to_le_bytes());
    } else {
        out.push(OP_PUSHDATA4);
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    }
    out.extend_from_slice(data);
    out
}

/// Byte length of the unit starting at `cursor`: push header plus declared
/// payload, or a single byte for every other opcode. Never reads past the
/// buffer; a declared length that would is an error.
pub fn unit_len(script: &[u8], cursor: usize) -> Result<usize, ScriptError> {
    let Some(&opcode) = script.get(cursor) else {
        return Err(ScriptError::TruncatedLength);
    };
    let remaining = script.len() - cursor;
    let total = match opcode {
        0x01..=0x4b => 1 + opcode as usize,
        OP_PUSHDATA1 => {
            if remaining < 2 {
                return Err(ScriptError::TruncatedLength);
            }
            2 + script[cursor + 1] as usize
        }
        OP_PUSHDATA2 => {
            if remaining < 3 {
                return Err(ScriptError::TruncatedLength);
            }
            3 + u16::from_le_bytes([script[cursor + 1], script[cursor + 2]]) as usize
        }
        OP_PUSHDATA4 => {
            if remaining < 5 {
                return Err(ScriptError::TruncatedLength);
            }
            let declared = u32::from_le_bytes([
                script[cursor + 1],
                script[cursor + 2],
                script[cursor + 3],
                script[cursor + 4],
            ]);
            5 + declared as usize
        }
        _ => return Ok(1),
    };
    if total > remaining {
        return Err(ScriptError::TruncatedPush);
    }
    Ok(total)
}

/// Decode one unit at `cursor`: the header bytes (opcode plus any length
/// field), the push payload when the unit carries one, and the total bytes
/// consumed.
pub fn decode_unit(
    script: &[u8],
    cursor: usize,
) -> Result<(&[u8], Option<&[u8]>, usize), ScriptError> {
    let total = unit_len(script, cursor)?;
    let header = match script[cursor] {
        0x01..=0x4b => 1,
        OP_PUSHDATA1 => 2,
        OP_PUSHDATA2 => 3,
        OP_PUSHDATA4 => 5,
        _ => return Ok((&script[cursor..cursor + 1], None, 1)),
    };
    Ok((
        &script[cursor..cursor + header],
        Some(&script[cursor + header..cursor + total]),
        total,
    ))
}
