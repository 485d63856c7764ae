use sha1::{Digest, Sha1};

/// Scheme prefix carried in the `Authorization` header.
pub const SIGNATURE_SCHEME: &str = "Signature ";

/// Compute the header value the platform sends for `body`:
/// `"Signature " + hex(sha1(body ++ secret))`.
pub fn sign(body: &[u8], secret: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(body);
    hasher.update(secret.as_bytes());
    format!("{}{}", SIGNATURE_SCHEME, hex::encode(hasher.finalize()))
}

/// Check a supplied `Authorization` value against the expected signature.
/// A missing header never verifies.
pub fn verify(body: &[u8], secret: &str, supplied: Option<&str>) -> bool {
    match supplied {
        Some(header) => sign(body, secret) == header,
        None => false,
    }
}
