//! Inbound request authentication.
//!
//! Terraform Cloud signs each notification with HMAC-SHA512 over the raw
//! request body, keyed by the token configured on the notification, and sends
//! the lowercase hex digest in the `X-TFE-Notification-Signature` header.
//!
//! Verification is opt-in: without a configured secret every request is
//! accepted.

use crate::error::AuthError;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;
use tracing::instrument;

/// Header carrying the notification signature.
pub const SIGNATURE_HEADER: &str = "X-TFE-Notification-Signature";

type HmacSha512 = Hmac<Sha512>;

/// Verify a request body against its signature header.
///
/// * `secret` unset or empty: always succeeds.
/// * header absent or empty: [`AuthError::MissingSignature`].
/// * header differs from the hex HMAC-SHA512 of `raw_body`:
///   [`AuthError::SignatureMismatch`].
///
/// The header is compared as text, byte for byte and in constant time, so an
/// uppercase hex digest does not match.
pub fn verify(
    raw_body: &[u8],
    supplied_signature: Option<&str>,
    secret: Option<&str>,
) -> Result<(), AuthError> {
    let secret = match secret {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(()),
    };

    let supplied = match supplied_signature {
        Some(s) if !s.is_empty() => s,
        _ => return Err(AuthError::MissingSignature),
    };

    let expected = compute_signature(secret, raw_body);
    if bool::from(expected.as_bytes().ct_eq(supplied.as_bytes())) {
        Ok(())
    } else {
        Err(AuthError::SignatureMismatch)
    }
}

/// Lowercase hex HMAC-SHA512 of `body` keyed by `secret`.
pub fn compute_signature(secret: &str, body: &[u8]) -> String {
    let mut mac =
        HmacSha512::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

// ============================================================================
// Authenticator
// ============================================================================

/// Request authenticator holding the optional shared secret.
///
/// Built once from configuration and shared across requests.
#[derive(Clone, Default)]
pub struct Authenticator {
    secret: Option<String>,
}

impl Authenticator {
    /// Create an authenticator. An empty secret disables verification.
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    /// An authenticator that accepts every request.
    pub fn disabled() -> Self {
        Self { secret: None }
    }

    /// Whether a secret is configured.
    pub fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    /// Verify a request. See [`verify`].
    #[instrument(skip_all, fields(enabled = self.is_enabled(), body_len = raw_body.len()))]
    pub fn verify(&self, raw_body: &[u8], supplied_signature: Option<&str>) -> Result<(), AuthError> {
        verify(raw_body, supplied_signature, self.secret.as_deref())
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("secret", &self.secret.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

#[cfg(test)]
#[path = "authenticator_tests.rs"]
mod tests;
