//! Local inspection of self-describing bearer tokens.
//!
//! Only the `exp` claim of a JWT-shaped token is read. The signature is not
//! checked; that stays with the remote API.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use time::OffsetDateTime;

#[derive(Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// Expiry encoded in a JWT's payload, or `None` for opaque tokens and tokens
/// without an `exp` claim.
#[must_use]
pub fn expires_at(token: &str) -> Option<OffsetDateTime> {
    let mut parts = token.split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    OffsetDateTime::from_unix_timestamp(claims.exp?).ok()
}

/// True only when the token carries an `exp` claim at or before `now`.
#[must_use]
pub fn is_expired(token: &str, now: OffsetDateTime) -> bool {
    expires_at(token).is_some_and(|exp| exp <= now)
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
