use crate::error::AuthError;
use crate::seed::Seed;
use log::warn;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Persistence boundary for the single decrypted seed.
///
/// A store holds at most one seed: `write` replaces any previous value
/// atomically with respect to concurrent reads, and `read` fails with
/// [`AuthError::NotFound`] until the first successful write.
pub trait SeedStore: Send + Sync {
    /// Replaces the stored seed. Concurrent writers are serialized;
    /// a reader observes either the old or the new complete value.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the backing medium rejects the
    /// write.
    fn write(&self, seed: &Seed) -> Result<(), AuthError>;

    /// Returns the stored seed.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotFound`] if no seed has been written (or the
    /// backing medium was externally cleared). This is the expected state
    /// before the first decrypt, not a corruption signal.
    fn read(&self) -> Result<Seed, AuthError>;
}

/// File-backed store, persisting the seed as its hex text.
///
/// Writes go to a sibling temp file followed by a rename, so a concurrent
/// reader can never observe a torn value. The persisted file is restricted
/// to mode 0600 on a best-effort basis: a failure to apply the restriction
/// is logged as a warning but does not abort the write.
pub struct FileSeedStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSeedStore {
    /// Creates a store backed by the file at `path`. The file (and its
    /// parent directory) is created on the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl SeedStore for FileSeedStore {
    fn write(&self, seed: &Seed) -> Result<(), AuthError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AuthError::Internal("seed store lock poisoned".to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp = self.temp_path();
        fs::write(&temp, seed.as_str())?;
        restrict_permissions(&temp);
        fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn read(&self) -> Result<Seed, AuthError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AuthError::NotFound);
            }
            Err(e) => return Err(AuthError::Storage(e)),
        };
        Seed::parse(&content)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &std::path::Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        warn!("failed to restrict seed file permissions: {e}");
    }
}

#[cfg(not(unix))]
fn restrict_permissions(path: &std::path::Path) {
    let _ = path;
    warn!("seed file permission restriction is not supported on this platform");
}

/// In-memory store for tests and embedded assemblies.
#[derive(Default)]
pub struct MemorySeedStore {
    slot: Mutex<Option<Seed>>,
}

impl MemorySeedStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SeedStore for MemorySeedStore {
    fn write(&self, seed: &Seed) -> Result<(), AuthError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| AuthError::Internal("seed store lock poisoned".to_string()))?;
        *slot = Some(seed.clone());
        Ok(())
    }

    fn read(&self) -> Result<Seed, AuthError> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| AuthError::Internal("seed store lock poisoned".to_string()))?;
        slot.clone().ok_or(AuthError::NotFound)
    }
}
