//! Delivery authentication for the `/github` endpoint.
//!
//! GitHub signs each delivery body with HMAC-SHA256 keyed by the webhook
//! secret and sends the digest as `X-Hub-Signature-256: sha256=<hex>`. The
//! legacy `X-Hub-Signature` (SHA-1) header is not accepted.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SHA256_PREFIX: &str = "sha256=";

/// Checks a delivery body against its `X-Hub-Signature-256` header value.
///
/// Malformed headers (wrong algorithm, bad hex, truncated digest) never
/// verify. The digest comparison is constant-time.
///
/// ```
/// use cakebot::webhooks::verify_signature;
///
/// assert!(!verify_signature(b"{}", "sha1=da39a3ee", b"secret"));
/// assert!(!verify_signature(b"{}", "", b"secret"));
/// ```
pub fn verify_signature(body: &[u8], header: &str, secret: &[u8]) -> bool {
    let Some(digest) = header
        .strip_prefix(SHA256_PREFIX)
        .and_then(|hex_digest| hex::decode(hex_digest).ok())
    else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&digest).is_ok()
}

/// The header value GitHub would send for `body` signed with `secret`.
#[cfg(test)]
pub(crate) fn sign(body: &[u8], secret: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).unwrap();
    mac.update(body);
    format!("{}{}", SHA256_PREFIX, hex::encode(mac.finalize().into_bytes()))
}
