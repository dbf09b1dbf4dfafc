//! Unpadded URL-safe base64, as used by the `dns` GET parameter (RFC 8484 §4.1).

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use ferrous_doh_domain::DomainError;

/// Encodes with the URL-safe alphabet and no trailing `=`.
pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Restores the padding stripped by clients, then decodes.
pub fn decode(input: &str) -> Result<Vec<u8>, DomainError> {
    let missing = (4 - input.len() % 4) % 4;
    let mut padded = String::with_capacity(input.len() + missing);
    padded.push_str(input);
    padded.extend(std::iter::repeat('=').take(missing));

    URL_SAFE
        .decode(padded.as_bytes())
        .map_err(|e| DomainError::InvalidBase64(e.to_string()))
}
