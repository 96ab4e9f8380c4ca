//! Invite tokens and access codes.
//!
//! Invite tokens are opaque, URL-safe, and carry 256 bits from the thread
//! CSPRNG. Access codes are shorter and meant to be read aloud or typed:
//! twelve symbols from the Crockford base32 alphabet, shown in groups of
//! four.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::{Rng, RngCore};

/// Bytes of randomness in an invite token.
const INVITE_TOKEN_BYTES: usize = 32;

/// Crockford base32: no I, L, O, or U.
const CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Symbols in a freshly issued access code.
pub const ACCESS_CODE_LEN: usize = 12;

/// Symbols per displayed group.
const CODE_GROUP: usize = 4;

/// Upper bound on accepted code length after normalization.
const MAX_CODE_LEN: usize = 64;

/// Generate a new invite token.
pub fn generate_invite_token() -> String {
    let mut bytes = [0u8; INVITE_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Generate a new access code in normalized form.
pub fn generate_access_code() -> String {
    let mut rng = rand::rng();
    (0..ACCESS_CODE_LEN)
        .map(|_| char::from(CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())]))
        .collect()
}

/// Normalize a user-entered access code: strip separators and upper-case.
///
/// Returns `None` for input that cannot be a code.
pub fn normalize_access_code(raw: &str) -> Option<String> {
    let code: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if code.is_empty() || code.len() > MAX_CODE_LEN || !code.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(code)
}

/// Format a normalized code for display, e.g. `ABCD-EFGH-JKMN`.
pub fn display_access_code(code: &str) -> String {
    code.as_bytes()
        .chunks(CODE_GROUP)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join("-")
}

/// Whether `token` has the shape of an invite token.
pub fn is_well_formed_token(token: &str) -> bool {
    !token.is_empty()
        && token.len() <= 128
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
