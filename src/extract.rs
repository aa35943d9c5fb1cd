//! Locate the JSON value a model embedded in a free-text reply.
//!
//! Models asked for JSON often wrap it in prose ("Here you go: {...} Let me
//! know if..."). [`extract_json_fragment`] isolates the first balanced object or
//! array so it can be handed to a real JSON decoder.
//!
//! The scanner is intentionally narrow:
//! - The opener is the first `{` or `[` anywhere in the text.
//! - Depth counts only the opener's bracket family. Inside a `{...}` fragment
//!   `[` and `]` never affect depth, and vice versa.
//! - A `"` toggles string state unless the byte before it is `\`. A quote
//!   preceded by an escaped backslash (`\\"`) is therefore still treated as
//!   escaped.
//!
//! Only ASCII bytes drive decisions, so scanning bytes is equivalent to scanning
//! characters and every returned boundary is a valid `str` index.

/// Extraction failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("no JSON object or array found in model reply")]
    NoJsonFound,
    #[error("JSON in model reply is incomplete or unbalanced")]
    UnbalancedJson,
}

/// Return the first balanced JSON object or array embedded in `text`
pub fn extract_json_fragment(text: &str) -> Result<&str, ExtractError> {
    let bytes = text.as_bytes();

    let start = bytes
        .iter()
        .position(|&b| b == b'{' || b == b'[')
        .ok_or(ExtractError::NoJsonFound)?;

    let open = bytes[start];
    let close = if open == b'{' { b'}' } else { b']' };

    let mut depth: usize = 0;
    let mut in_string = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if b == b'"' && (i == 0 || bytes[i - 1] != b'\\') {
            in_string = !in_string;
        }
        if in_string {
            continue;
        }
        if b == open {
            depth += 1;
        } else if b == close {
            // depth >= 1 here: the opener itself is the first byte scanned
            depth -= 1;
            if depth == 0 {
                return Ok(&text[start..=i]);
            }
        }
    }

    Err(ExtractError::UnbalancedJson)
}
