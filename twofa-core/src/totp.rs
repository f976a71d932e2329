// File:    totp.rs
// Author:  apezoo
// Date:    2025-08-02
//
// Description: TOTP code generation (RFC 6238, SHA-1) and tolerant-window verification.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::error::AuthError;
use crate::seed::EncodedSeed;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha1::Sha1;

/// Length of a time step in seconds. A domain constant, not configurable.
pub const TIME_STEP_SECONDS: u64 = 30;

/// Number of decimal digits in a one-time code.
pub const CODE_DIGITS: usize = 6;

/// Verification window used by the service: one adjacent step on each side.
pub const DEFAULT_VERIFY_WINDOW: i64 = 1;

/// Upper bound on the verification window. Anything outside `[0, MAX]` is
/// clamped to zero so `verify` stays total instead of rejecting the call.
pub const MAX_VERIFY_WINDOW: i64 = 4;

/// A generated one-time code together with its remaining validity.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CodeGrant {
    /// The 6-digit, zero-padded decimal code.
    pub code: String,
    /// Seconds until the current time step expires, always in `[1, 30]`.
    #[serde(rename = "valid_for")]
    pub seconds_remaining: u64,
}

/// The integer time-step counter for a given unix timestamp.
#[must_use]
pub const fn time_step(now: u64) -> u64 {
    now / TIME_STEP_SECONDS
}

/// Seconds left in the time step containing `now`.
///
/// On an exact step boundary this yields the full 30 seconds, never 0, so a
/// poller never observes "0 seconds remaining, code still usable".
#[must_use]
pub const fn seconds_remaining(now: u64) -> u64 {
    TIME_STEP_SECONDS - (now % TIME_STEP_SECONDS)
}

/// Computes the one-time code for the time step containing `now`.
///
/// # Errors
///
/// Returns [`AuthError::Internal`] if `encoded_seed` is not valid base32.
/// A malformed encoding cannot be produced by [`crate::seed::Seed::encode`],
/// so this indicates a contract violation in the assembly.
pub fn generate(encoded_seed: &EncodedSeed, now: u64) -> Result<CodeGrant, AuthError> {
    let key = decode_key(encoded_seed)?;
    Ok(CodeGrant {
        code: hotp(&key, time_step(now)),
        seconds_remaining: seconds_remaining(now),
    })
}

/// Verifies `code` against the time steps within `window` of `now`.
///
/// A code that is not exactly 6 ASCII digits is a normal negative result
/// (`Ok(false)`), not an error: garbage submissions are expected traffic.
/// A negative or out-of-range `window` is clamped to zero. Each candidate
/// code is compared with a fixed-time equality check.
///
/// # Errors
///
/// Returns [`AuthError::Internal`] if `encoded_seed` is not valid base32,
/// rather than a deceptive `Ok(false)`.
pub fn verify(
    encoded_seed: &EncodedSeed,
    code: &str,
    now: u64,
    window: i64,
) -> Result<bool, AuthError> {
    let key = decode_key(encoded_seed)?;

    if code.len() != CODE_DIGITS || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(false);
    }

    let window = if (0..=MAX_VERIFY_WINDOW).contains(&window) {
        window.unsigned_abs()
    } else {
        0
    };

    let step = time_step(now);
    let mut matched = false;
    for candidate in step.saturating_sub(window)..=step.saturating_add(window) {
        matched |= constant_time_eq(hotp(&key, candidate).as_bytes(), code.as_bytes());
    }
    Ok(matched)
}

fn decode_key(encoded_seed: &EncodedSeed) -> Result<Vec<u8>, AuthError> {
    base32::decode(
        base32::Alphabet::Rfc4648 { padding: true },
        encoded_seed.as_str(),
    )
    .ok_or_else(|| AuthError::Internal("encoded seed is not valid base32".to_string()))
}

/// HOTP (RFC 4226): HMAC-SHA-1 over the big-endian counter, dynamic
/// truncation, reduced modulo 10^6.
fn hotp(key: &[u8], counter: u64) -> String {
    let mut mac = Hmac::<Sha1>::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary = (u32::from(digest[offset] & 0x7f) << 24)
        | (u32::from(digest[offset + 1]) << 16)
        | (u32::from(digest[offset + 2]) << 8)
        | u32::from(digest[offset + 3]);

    // 10^CODE_DIGITS
    const MODULUS: u32 = 1_000_000;
    let code = binary % MODULUS;
    format!("{code:0width$}", width = CODE_DIGITS)
}

/// Fixed-time comparison so verification does not leak how many leading
/// digits of a candidate matched.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
