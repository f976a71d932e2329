#![allow(missing_docs)]
use std::sync::Arc;
use tempfile::tempdir;
use twofa_core::error::AuthError;
use twofa_core::seed::Seed;
use twofa_core::store::{FileSeedStore, MemorySeedStore, SeedStore};

fn seed(fill: &str) -> Seed {
    Seed::parse(&fill.repeat(16)).expect("test seed must be valid")
}

#[test]
fn test_read_on_empty_store_is_not_found() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let store = FileSeedStore::new(temp_dir.path().join("seed.txt"));
    assert!(matches!(store.read(), Err(AuthError::NotFound)));
}

#[test]
fn test_write_then_read_returns_exact_seed() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let store = FileSeedStore::new(temp_dir.path().join("seed.txt"));

    let s = seed("ab12");
    store.write(&s).expect("write failed");
    assert_eq!(store.read().expect("read failed"), s);
}

#[test]
fn test_second_write_replaces_first_without_history() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let store = FileSeedStore::new(temp_dir.path().join("seed.txt"));

    store.write(&seed("1111")).expect("first write failed");
    store.write(&seed("2222")).expect("second write failed");
    assert_eq!(store.read().expect("read failed"), seed("2222"));
}

#[test]
fn test_write_creates_missing_parent_directory() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("data/nested/seed.txt");
    let store = FileSeedStore::new(&path);

    store.write(&seed("cafe")).expect("write failed");
    assert!(path.exists());
}

#[test]
fn test_no_temp_file_survives_a_write() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("seed.txt");
    let store = FileSeedStore::new(&path);

    store.write(&seed("dead")).expect("write failed");
    let entries: Vec<_> = std::fs::read_dir(temp_dir.path())
        .expect("Failed to list temp dir")
        .map(|e| e.expect("dir entry").file_name())
        .collect();
    assert_eq!(entries, vec!["seed.txt"]);
}

#[cfg(unix)]
#[test]
fn test_persisted_seed_is_mode_0600() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("seed.txt");
    let store = FileSeedStore::new(&path);
    store.write(&seed("beef")).expect("write failed");

    let mode = std::fs::metadata(&path)
        .expect("Failed to stat seed file")
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_concurrent_writers_never_produce_a_torn_value() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let store = Arc::new(FileSeedStore::new(temp_dir.path().join("seed.txt")));

    let handles: Vec<_> = ["1111", "2222", "3333", "4444"]
        .into_iter()
        .map(|fill| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for _ in 0..20 {
                    store.write(&seed(fill)).expect("write failed");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("writer thread panicked");
    }

    // Whatever won, the stored value is one complete seed.
    let last = store.read().expect("read failed");
    assert!(["1111", "2222", "3333", "4444"].iter().any(|f| last == seed(f)));
}

#[test]
fn test_memory_store_honors_the_same_contract() {
    let store = MemorySeedStore::new();
    assert!(matches!(store.read(), Err(AuthError::NotFound)));

    store.write(&seed("0f0f")).expect("write failed");
    assert_eq!(store.read().expect("read failed"), seed("0f0f"));

    store.write(&seed("9999")).expect("write failed");
    assert_eq!(store.read().expect("read failed"), seed("9999"));
}
