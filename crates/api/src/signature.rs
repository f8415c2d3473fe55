//! Request signature computation
//!
//! The OVH API authenticates each request with a SHA-1 digest over the
//! application secret, the consumer key, the method, the full URL, the
//! serialized body, and a timestamp, joined with `+`. The digest travels in
//! the `X-Ovh-Signature` header, prefixed with the scheme tag `$1$`.

use sha1::{Digest, Sha1};

/// Compute the `X-Ovh-Signature` value for one request.
///
/// `body` is the exact serialized payload sent on the wire, or the empty
/// string for bodyless requests. `timestamp` must match the
/// `X-Ovh-Timestamp` header, already corrected for server clock drift.
pub fn sign(
    application_secret: &str,
    consumer_key: &str,
    method: &str,
    url: &str,
    body: &str,
    timestamp: i64,
) -> String {
    let canonical =
        format!("{application_secret}+{consumer_key}+{method}+{url}+{body}+{timestamp}");

    let mut hasher = Sha1::new();
    hasher.update(canonical.as_bytes());
    format!("$1${}", hex::encode(hasher.finalize()))
}
