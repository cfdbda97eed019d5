//! Register payload decoding.
//!
//! Pure functions, no I/O. Byte order is big-endian within a register and
//! big-endian across registers: the first register read holds the most
//! significant bytes of the reassembled payload.

use std::string::FromUtf8Error;

/// Reinterprets a register block as text.
///
/// A block of `L` registers becomes `2×L` bytes, decoded as UTF-8 with
/// surrounding whitespace and NUL padding trimmed. Printability is not
/// validated; a payload that is not valid UTF-8 is an error the caller
/// discards like any failed read.
pub fn registers_to_string(words: &[u16]) -> Result<String, FromUtf8Error> {
    let mut bytes = Vec::with_capacity(words.len() * 2);
    for word in words {
        bytes.extend_from_slice(&word.to_be_bytes());
    }

    let text = String::from_utf8(bytes)?;
    Ok(text
        .trim_matches(|c: char| c.is_whitespace() || c == '\0')
        .to_string())
}

/// Renders each register as one decimal component of a dotted version
/// string, e.g. `[1, 2, 0, 5]` becomes `"1.2.0.5"`.
pub fn registers_to_version(words: &[u16]) -> String {
    words
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
