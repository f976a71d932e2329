// File:    seed.rs
// Author:  apezoo
// Date:    2025-08-02
//
// Description: The validated seed value type and its base32 encoding for the TOTP engine.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::error::AuthError;

/// Number of hex characters in a canonical seed (256 bits).
pub const SEED_HEX_LEN: usize = 64;

/// A validated 256-bit seed, canonically represented as 64 lowercase hex
/// characters.
///
/// The only way to obtain a `Seed` is through [`Seed::parse`], so every
/// instance satisfies the invariant: length 64, charset `[0-9a-f]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed(String);

impl Seed {
    /// Validates `input` as a canonical seed.
    ///
    /// Surrounding whitespace is stripped and uppercase hex digits are
    /// normalized to lowercase. The length check applies to the trimmed
    /// input, before normalization.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidSeedFormat`] if the trimmed input is not
    /// exactly 64 characters or contains a non-hex character.
    pub fn parse(input: &str) -> Result<Self, AuthError> {
        let trimmed = input.trim();
        if trimmed.len() != SEED_HEX_LEN {
            return Err(AuthError::InvalidSeedFormat);
        }
        let normalized = trimmed.to_ascii_lowercase();
        if !normalized.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(AuthError::InvalidSeedFormat);
        }
        Ok(Self(normalized))
    }

    /// The canonical 64-character lowercase hex representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encodes the seed into the base32 alphabet required by the TOTP
    /// algorithm (RFC 4648, uppercase, padded).
    ///
    /// Total for any value satisfying the `Seed` invariant.
    #[must_use]
    pub fn encode(&self) -> EncodedSeed {
        let bytes = hex::decode(&self.0).expect("Seed invariant guarantees valid hex");
        EncodedSeed(base32::encode(
            base32::Alphabet::Rfc4648 { padding: true },
            &bytes,
        ))
    }
}

/// The base32 form of a seed, as consumed by the TOTP engine.
///
/// Derived from a [`Seed`] on every use and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSeed(String);

impl EncodedSeed {
    /// Wraps an already base32-encoded secret.
    ///
    /// Exists for interoperability with externally provisioned secrets
    /// (e.g. RFC test vectors); the service derives its encoded seed via
    /// [`Seed::encode`].
    #[must_use]
    pub fn from_base32(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The base32 string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
