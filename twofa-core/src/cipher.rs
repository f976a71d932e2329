// File:    cipher.rs
// Author:  apezoo
// Date:    2025-08-02
//
// Description: RSA-OAEP decryption of the issuer-encrypted seed with strict plaintext validation.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::error::AuthError;
use crate::seed::Seed;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use rsa::{Oaep, RsaPrivateKey};
use sha2::Sha256;

/// Decrypts a base64-encoded, RSA-OAEP-encrypted seed and validates the
/// plaintext as a canonical seed.
///
/// OAEP is parameterized with SHA-256 as both the digest and the MGF1 hash,
/// and an empty label. Every decryption failure is reported as
/// [`AuthError::DecryptionFailed`] regardless of cause, so the error kind
/// cannot be used as a padding oracle. Neither the plaintext nor any key
/// material is ever logged.
///
/// # Errors
///
/// * [`AuthError::MalformedInput`] — `ciphertext_b64` is not valid base64.
/// * [`AuthError::DecryptionFailed`] — the RSA-OAEP decryption was rejected.
/// * [`AuthError::InvalidSeedFormat`] — the plaintext is not UTF-8 text
///   whose trimmed form is a 64-character hex string.
pub fn decrypt_seed(ciphertext_b64: &str, private_key: &RsaPrivateKey) -> Result<Seed, AuthError> {
    let ciphertext = BASE64
        .decode(ciphertext_b64.trim())
        .map_err(|_| AuthError::MalformedInput)?;

    let plaintext = private_key
        .decrypt(Oaep::new::<Sha256>(), &ciphertext)
        .map_err(|_| AuthError::DecryptionFailed)?;

    let text = String::from_utf8(plaintext).map_err(|_| AuthError::InvalidSeedFormat)?;
    Seed::parse(&text)
}
