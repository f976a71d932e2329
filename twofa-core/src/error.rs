use thiserror::Error;

/// Errors surfaced by the seed-handling and verification operations.
///
/// All variants are terminal for the calling operation; nothing is retried
/// internally. Padding failures and key mismatches are deliberately collapsed
/// into [`AuthError::DecryptionFailed`] so callers cannot distinguish *why* a
/// decryption was rejected.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The supplied ciphertext was not valid base64.
    #[error("ciphertext is not valid base64")]
    MalformedInput,

    /// RSA-OAEP decryption failed (wrong key, corrupted ciphertext, or
    /// padding mismatch; the cases are intentionally not distinguished).
    #[error("decryption failed")]
    DecryptionFailed,

    /// The decrypted plaintext was not a canonical 64-character hex seed.
    #[error("decrypted payload is not a 64-character hex seed")]
    InvalidSeedFormat,

    /// No seed has been stored yet, or the backing store was cleared.
    #[error("no seed has been stored")]
    NotFound,

    /// The seed store could not be read or written.
    #[error("seed store I/O failure: {0}")]
    Storage(#[from] std::io::Error),

    /// A value that violates an internal invariant reached this layer.
    /// This indicates a programming error in the assembly, not bad input.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors raised while loading RSA key material from disk.
#[derive(Error, Debug)]
pub enum KeyError {
    /// The key file could not be read.
    #[error("failed to read key file: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents were not a parseable unencrypted PEM key.
    #[error("failed to parse PEM key: {0}")]
    Parse(String),
}
