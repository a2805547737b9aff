//! Base62 Token Encoding
//!
//! Maps link identifiers to compact alphanumeric tokens and back.

use crate::error::{Result, ShortlinkError};

/// Digits, then lowercase, then uppercase.
const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const BASE: u64 = 62;

/// Longest token the router accepts.
pub const MAX_TOKEN_LEN: usize = 11;

/// Encodes `id` in base62. Zero encodes to `"0"`.
pub fn encode(mut id: u64) -> String {
    if id == 0 {
        return "0".to_string();
    }

    let mut buf = Vec::with_capacity(MAX_TOKEN_LEN);
    while id > 0 {
        buf.push(ALPHABET[(id % BASE) as usize]);
        id /= BASE;
    }
    buf.reverse();
    buf.into_iter().map(char::from).collect()
}

/// Decodes a base62 token back into its identifier.
///
/// Fails with `InvalidToken` on empty input, characters outside the alphabet,
/// or values that do not fit in a `u64`.
pub fn decode(token: &str) -> Result<u64> {
    if token.is_empty() {
        return Err(ShortlinkError::InvalidToken("empty token".to_string()));
    }

    token.bytes().try_fold(0u64, |acc, byte| {
        let digit = digit_value(byte).ok_or_else(|| {
            ShortlinkError::InvalidToken(format!("'{}' contains invalid characters", token))
        })?;
        acc.checked_mul(BASE)
            .and_then(|acc| acc.checked_add(digit))
            .ok_or_else(|| ShortlinkError::InvalidToken(format!("'{}' is out of range", token)))
    })
}

/// Checks a token against the shape accepted at the routing boundary:
/// 1 to 11 ASCII alphanumerics.
pub fn is_valid_token(token: &str) -> bool {
    (1..=MAX_TOKEN_LEN).contains(&token.len()) && token.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn digit_value(byte: u8) -> Option<u64> {
    let value = match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'z' => byte - b'a' + 10,
        b'A'..=b'Z' => byte - b'A' + 36,
        _ => return None,
    };
    Some(value as u64)
}
