//! Email normalization shared by both enrollment paths.

/// Trim and lower-case an email address.
///
/// Returns `None` when the result is not plausibly an address: empty, no
/// `@`, empty local part or domain, or embedded whitespace.
pub fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim().to_lowercase();
    let (local, domain) = email.split_once('@')?;
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || email.chars().any(char::is_whitespace)
    {
        return None;
    }
    Some(email)
}
