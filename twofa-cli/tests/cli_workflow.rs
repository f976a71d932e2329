#![allow(missing_docs)]
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;
use twofa_core::cipher::decrypt_seed;
use twofa_core::keys;

#[test]
fn test_keygen_writes_a_loadable_pem_pair() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let private_path = temp_dir.path().join("private.pem");
    let public_path = temp_dir.path().join("public.pem");

    Command::cargo_bin("twofa-cli")
        .expect("Failed to find twofa-cli binary")
        .arg("keygen")
        .arg("--private-out").arg(&private_path)
        .arg("--public-out").arg(&public_path)
        .arg("--bits").arg("2048")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated private key"));

    keys::load_private_key(&private_path).expect("private key should load");
    keys::load_public_key(&public_path).expect("public key should load");
}

#[cfg(unix)]
#[test]
fn test_keygen_restricts_private_key_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempdir().expect("Failed to create temp dir");
    let private_path = temp_dir.path().join("private.pem");

    Command::cargo_bin("twofa-cli")
        .expect("Failed to find twofa-cli binary")
        .arg("keygen")
        .arg("--private-out").arg(&private_path)
        .arg("--public-out").arg(temp_dir.path().join("public.pem"))
        .arg("--bits").arg("2048")
        .assert()
        .success();

    let mode = fs::metadata(&private_path)
        .expect("Failed to stat private key")
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_encrypt_seed_output_roundtrips_through_the_cipher() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let private_path = temp_dir.path().join("private.pem");
    let public_path = temp_dir.path().join("public.pem");
    let hex_seed = "5ca1ab1e".repeat(8);

    Command::cargo_bin("twofa-cli")
        .expect("Failed to find twofa-cli binary")
        .arg("keygen")
        .arg("--private-out").arg(&private_path)
        .arg("--public-out").arg(&public_path)
        .arg("--bits").arg("2048")
        .assert()
        .success();

    let output = Command::cargo_bin("twofa-cli")
        .expect("Failed to find twofa-cli binary")
        .arg("encrypt-seed")
        .arg("--public-key").arg(&public_path)
        .arg("--seed").arg(&hex_seed)
        .output()
        .expect("Failed to encrypt seed");
    assert!(output.status.success());

    let ciphertext_b64 = String::from_utf8(output.stdout)
        .expect("Failed to read stdout")
        .trim()
        .to_string();
    let private_key = keys::load_private_key(&private_path).expect("private key should load");
    let seed = decrypt_seed(&ciphertext_b64, &private_key).expect("roundtrip decrypt failed");
    assert_eq!(seed.as_str(), hex_seed);
}

#[test]
fn test_encrypt_seed_rejects_a_malformed_seed() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let public_path = temp_dir.path().join("public.pem");

    Command::cargo_bin("twofa-cli")
        .expect("Failed to find twofa-cli binary")
        .arg("keygen")
        .arg("--private-out").arg(temp_dir.path().join("private.pem"))
        .arg("--public-out").arg(&public_path)
        .arg("--bits").arg("2048")
        .assert()
        .success();

    Command::cargo_bin("twofa-cli")
        .expect("Failed to find twofa-cli binary")
        .arg("encrypt-seed")
        .arg("--public-key").arg(&public_path)
        .arg("--seed").arg("definitely-not-hex")
        .assert()
        .failure();
}

#[test]
fn test_code_prints_a_timestamped_six_digit_code() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let seed_path = temp_dir.path().join("seed.txt");
    fs::write(&seed_path, "c0ffee00".repeat(8)).expect("Failed to write seed file");

    Command::cargo_bin("twofa-cli")
        .expect("Failed to find twofa-cli binary")
        .arg("code")
        .arg("--seed-file").arg(&seed_path)
        .assert()
        .success()
        .stdout(predicate::str::is_match(r" - 2FA Code: \d{6}\n$").expect("valid regex"));
}

#[test]
fn test_code_fails_cleanly_without_a_seed_file() {
    let temp_dir = tempdir().expect("Failed to create temp dir");

    Command::cargo_bin("twofa-cli")
        .expect("Failed to find twofa-cli binary")
        .arg("code")
        .arg("--seed-file").arg(temp_dir.path().join("missing.txt"))
        .assert()
        .failure();
}
