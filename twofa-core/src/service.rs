use crate::cipher;
use crate::error::AuthError;
use crate::store::SeedStore;
use crate::totp::{self, CodeGrant, DEFAULT_VERIFY_WINDOW};
use rsa::RsaPrivateKey;

/// Facade tying the cipher, the seed store, and the TOTP engine together.
///
/// This is the surface the HTTP collaborator calls. The service is
/// stateless apart from the store it owns; wall-clock time is always passed
/// in explicitly so callers (and tests) control it.
pub struct AuthService {
    private_key: RsaPrivateKey,
    store: Box<dyn SeedStore>,
    verify_window: i64,
}

impl AuthService {
    /// Creates a service with the default verification window of ±1 step.
    #[must_use]
    pub fn new(private_key: RsaPrivateKey, store: Box<dyn SeedStore>) -> Self {
        Self {
            private_key,
            store,
            verify_window: DEFAULT_VERIFY_WINDOW,
        }
    }

    /// Decrypts an issuer-encrypted seed and persists it, replacing any
    /// previously stored seed.
    ///
    /// # Errors
    ///
    /// * [`AuthError::MalformedInput`] — the ciphertext is not valid base64.
    /// * [`AuthError::DecryptionFailed`] — the RSA-OAEP decryption was
    ///   rejected (cause deliberately undifferentiated).
    /// * [`AuthError::InvalidSeedFormat`] — the plaintext is not a canonical
    ///   64-character hex seed.
    /// * [`AuthError::Storage`] — the store rejected the write.
    pub fn decrypt_and_store(&self, ciphertext_b64: &str) -> Result<(), AuthError> {
        let seed = cipher::decrypt_seed(ciphertext_b64, &self.private_key)?;
        self.store.write(&seed)
    }

    /// Generates the current one-time code and its remaining validity.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotFound`] if no seed has been stored yet.
    pub fn generate_code(&self, now: u64) -> Result<CodeGrant, AuthError> {
        let seed = self.store.read()?;
        totp::generate(&seed.encode(), now)
    }

    /// Verifies a caller-supplied code against the stored seed, tolerating
    /// the configured window of adjacent time steps.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotFound`] if no seed has been stored yet.
    pub fn verify_code(&self, code: &str, now: u64) -> Result<bool, AuthError> {
        let seed = self.store.read()?;
        totp::verify(&seed.encode(), code, now, self.verify_window)
    }
}
