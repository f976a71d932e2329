use crate::error::KeyError;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fs;
use std::path::Path;

/// Loads an unencrypted PEM private key from `path`.
///
/// PKCS#8 is tried first, with a PKCS#1 (`BEGIN RSA PRIVATE KEY`) fallback.
/// This is the only place in the library that performs I/O on key material.
///
/// # Errors
///
/// Returns [`KeyError::Io`] if the file cannot be read and
/// [`KeyError::Parse`] if its contents are not a parseable RSA private key.
pub fn load_private_key(path: &Path) -> Result<RsaPrivateKey, KeyError> {
    let pem = fs::read_to_string(path)?;
    if let Ok(key) = RsaPrivateKey::from_pkcs8_pem(&pem) {
        return Ok(key);
    }
    RsaPrivateKey::from_pkcs1_pem(&pem).map_err(|e| KeyError::Parse(e.to_string()))
}

/// Loads a PEM public key (SubjectPublicKeyInfo) from `path`.
///
/// Used by the issuer-side encryption utility; the service itself only ever
/// needs the private key.
///
/// # Errors
///
/// Returns [`KeyError::Io`] if the file cannot be read and
/// [`KeyError::Parse`] if its contents are not a parseable RSA public key.
pub fn load_public_key(path: &Path) -> Result<RsaPublicKey, KeyError> {
    let pem = fs::read_to_string(path)?;
    RsaPublicKey::from_public_key_pem(&pem).map_err(|e| KeyError::Parse(e.to_string()))
}
