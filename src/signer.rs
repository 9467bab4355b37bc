//! HMAC-SHA1 request signing.
//!
//! Every request carries an `Expires` Unix timestamp and a `Signature` derived
//! from the AccessID, that timestamp and the secret key:
//!
//! 1. Build the string `"{access_id}\n{expires}"`
//! 2. Compute its HMAC-SHA1 with the secret key
//! 3. Base64-encode the raw digest (standard alphabet, padded)
//! 4. Percent-encode the result so it can be placed in a query string as-is

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::config::Credentials;

type HmacSha1 = Hmac<Sha1>;

/// Computes the percent-encoded signature for one expiry.
///
/// Pure function of its inputs, so the same triple always yields the same
/// signature.
///
/// # Example
///
/// ```
/// use moz_metrics::signer::sign;
///
/// let a = sign("member-123", "secret", 1_700_000_300);
/// let b = sign("member-123", "secret", 1_700_000_300);
/// assert_eq!(a, b);
/// assert!(!a.contains('+') && !a.contains('/') && !a.contains('='));
/// ```
pub fn sign(access_id: &str, secret_key: &str, expires: i64) -> String {
    let string_to_sign = format!("{}\n{}", access_id, expires);

    let mut mac =
        HmacSha1::new_from_slice(secret_key.as_bytes()).expect("HMAC can take any size");
    mac.update(string_to_sign.as_bytes());
    let digest = mac.finalize().into_bytes();

    let encoded = STANDARD.encode(digest);
    urlencoding::encode(&encoded).into_owned()
}

/// Expiry and signature for one outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedAuth {
    /// Unix timestamp after which the service rejects the request
    pub expires: i64,
    /// Percent-encoded signature, ready for the query string
    pub signature: String,
}

impl SignedAuth {
    /// Signs for an explicit expiry.
    pub fn for_expiry(credentials: &Credentials, expires: i64) -> Self {
        Self {
            expires,
            signature: sign(credentials.access_id(), credentials.secret_key(), expires),
        }
    }

    /// Mints a fresh expiry `expire_seconds` from now and signs it.
    ///
    /// Called once per outbound request; signatures are never cached.
    pub fn mint(credentials: &Credentials, expire_seconds: u64) -> Self {
        let expires = Utc::now()
            .timestamp()
            .saturating_add(i64::try_from(expire_seconds).unwrap_or(i64::MAX));
        Self::for_expiry(credentials, expires)
    }
}
