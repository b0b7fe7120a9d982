//! Unit-aligned subscript removal.
//!
//! Used when hashing a legacy input: everything before a previously-executed
//! separator marker must be stripped from the script code, one push-data
//! unit at a time rather than byte-by-byte.

use std::collections::VecDeque;

use txkit_primitives::hex::{bytes_from_hex, bytes_to_hex, HexError};

use crate::push::unit_len;

/// Remove every occurrence of `sub_script` that starts on a unit boundary
/// inside `script`. Byte-aligned matches inside a push payload are left
/// untouched. An empty `sub_script` is a no-op.
pub fn delete_from_script(script: &[u8], sub_script: &[u8]) -> Vec<u8> {
    if sub_script.is_empty() {
        return script.to_vec();
    }
    let ls = sub_script.len();
    let mut units: VecDeque<usize> = VecDeque::new();
    let mut out = Vec::with_capacity(script.len());
    let mut start = 0usize;
    let mut cursor = 0usize;

    while cursor < script.len() {
        // A trailing unit whose declared length overruns the buffer is
        // treated as one unit covering the remainder.
        let len = match unit_len(script, cursor) {
            Ok(len) => len,
            Err(_) => script.len() - cursor,
        };
        units.push_back(len);
        cursor += len;

        while cursor - start >= ls {
            if script[start..start + ls] == *sub_script {
                if cursor - start > ls {
                    out.extend_from_slice(&script[start + ls..cursor]);
                }
                units.clear();
                start = cursor;
            } else {
                let Some(oldest) = units.pop_front() else {
                    break;
                };
                out.extend_from_slice(&script[start..start + oldest]);
                start += oldest;
            }
        }
    }

    // Whatever remains in the window is shorter than the subscript.
    out.extend_from_slice(&script[start..]);
    out
}

/// Hex-preserving form of [`delete_from_script`].
pub fn delete_from_script_hex(script: &str, sub_script: &str) -> Result<String, HexError> {
    let script = bytes_from_hex(script)?;
    let sub_script = bytes_from_hex(sub_script)?;
    Ok(bytes_to_hex(&delete_from_script(&script, &sub_script)))
}
