//! Operator CLI for the 2FA seed service: key-pair generation,
//! issuer-side seed encryption, and code printing.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::{error, info, warn};
use rand::RngCore;
use rand::rngs::OsRng;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};
use twofa_core::seed::Seed;
use twofa_core::store::{FileSeedStore, SeedStore};
use twofa_core::{keys, totp};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an unencrypted RSA key pair as PEM files
    Keygen {
        /// Where to write the PKCS#8 private key
        #[arg(long, default_value = "private_key.pem")]
        private_out: PathBuf,

        /// Where to write the public key
        #[arg(long, default_value = "public_key.pem")]
        public_out: PathBuf,

        /// RSA modulus size in bits
        #[arg(long, default_value_t = 2048)]
        bits: usize,
    },

    /// Encrypt a seed for the service (issuer side); prints base64 to stdout
    EncryptSeed {
        /// Path to the recipient's PEM public key
        #[arg(long)]
        public_key: PathBuf,

        /// 64-character hex seed; a random seed is generated when omitted
        #[arg(long)]
        seed: Option<String>,
    },

    /// Print the current code for the stored seed with a UTC timestamp
    Code {
        /// Path to the persisted seed file
        #[arg(long, default_value = "/data/seed.txt")]
        seed_file: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: &Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Keygen {
            private_out,
            public_out,
            bits,
        } => keygen(private_out, public_out, *bits),
        Commands::EncryptSeed { public_key, seed } => encrypt_seed(public_key, seed.as_deref()),
        Commands::Code { seed_file } => print_code(seed_file),
    }
}

fn keygen(
    private_out: &Path,
    public_out: &Path,
    bits: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Generating a {bits}-bit RSA key pair.");
    let private_key = RsaPrivateKey::new(&mut OsRng, bits)?;

    let private_pem = private_key.to_pkcs8_pem(LineEnding::LF)?;
    fs::write(private_out, private_pem.as_bytes())?;
    restrict_permissions(private_out);

    let public_pem = RsaPublicKey::from(&private_key).to_public_key_pem(LineEnding::LF)?;
    fs::write(public_out, public_pem)?;

    println!("Generated private key: {}", private_out.display());
    println!("Generated public key:  {}", public_out.display());
    Ok(())
}

fn encrypt_seed(
    public_key_path: &Path,
    seed: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let public_key = keys::load_public_key(public_key_path)?;

    let hex_seed = match seed {
        Some(provided) => Seed::parse(provided)?.as_str().to_owned(),
        None => {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            let generated = hex::encode(bytes);
            // Operator needs the plaintext to provision the authenticator;
            // keep it off stdout so pipelines only capture the ciphertext.
            eprintln!("seed: {generated}");
            generated
        }
    };

    let ciphertext = public_key.encrypt(&mut OsRng, Oaep::new::<Sha256>(), hex_seed.as_bytes())?;
    println!("{}", BASE64.encode(ciphertext));
    Ok(())
}

fn print_code(seed_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileSeedStore::new(seed_file);
    let seed = store.read()?;
    let grant = totp::generate(&seed.encode(), unix_now())?;

    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S");
    println!("{timestamp} - 2FA Code: {}", grant.code);
    Ok(())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        warn!("failed to restrict private key permissions: {e}");
    }
}

#[cfg(not(unix))]
fn restrict_permissions(path: &Path) {
    let _ = path;
    warn!("private key permission restriction is not supported on this platform");
}
