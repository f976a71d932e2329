#![deny(missing_docs)]
//! HTTP front end for the 2FA seed service.
//!
//! Thin glue over [`twofa_core::AuthService`]: it supplies raw request
//! strings, reads the wall clock, and maps the core's error kinds to HTTP
//! statuses. All correctness-critical logic lives in the core.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use log::info;
use serde::Deserialize;
use serde_json::{Value, json};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use twofa_core::store::FileSeedStore;
use twofa_core::{AuthError, AuthService, keys};

/// Shared application state
#[derive(Clone)]
struct AppState {
    service: Arc<AuthService>,
}

#[derive(Deserialize)]
struct DecryptRequest {
    encrypted_seed: String,
}

#[derive(Deserialize)]
struct VerifyRequest {
    code: String,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let port: u16 = env::var("TWOFA_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let seed_path = env::var("TWOFA_SEED_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./data/seed.txt"));
    let key_path = env::var("TWOFA_PRIVATE_KEY")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./private_key.pem"));

    info!("Using seed store at: {}", seed_path.display());
    let private_key = keys::load_private_key(&key_path).expect("Failed to load private key");
    let service = AuthService::new(private_key, Box::new(FileSeedStore::new(seed_path)));

    let app_state = AppState {
        service: Arc::new(service),
    };

    // Build the Axum router.
    let app = Router::new()
        .route("/decrypt-seed", post(decrypt_seed_handler))
        .route("/generate-2fa", get(generate_handler))
        .route("/verify-2fa", post(verify_handler))
        .with_state(app_state);

    // Run the server.
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server failed");
}

/// Decrypts an issuer-encrypted seed and stores it.
///
/// All decrypt-path failures collapse into one 500 response; the error body
/// never reveals whether base64, padding, or validation rejected the input.
async fn decrypt_seed_handler(
    State(state): State<AppState>,
    Json(payload): Json<DecryptRequest>,
) -> (StatusCode, Json<Value>) {
    match state.service.decrypt_and_store(&payload.encrypted_seed) {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Decryption failed" })),
        ),
    }
}

async fn generate_handler(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.service.generate_code(unix_now()) {
        Ok(grant) => (StatusCode::OK, Json(json!(grant))),
        Err(AuthError::NotFound) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Seed not decrypted yet" })),
        ),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal error" })),
        ),
    }
}

async fn verify_handler(
    State(state): State<AppState>,
    Json(payload): Json<VerifyRequest>,
) -> (StatusCode, Json<Value>) {
    if payload.code.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing code" })),
        );
    }

    match state.service.verify_code(&payload.code, unix_now()) {
        Ok(valid) => (StatusCode::OK, Json(json!({ "valid": valid }))),
        Err(AuthError::NotFound) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Seed not decrypted yet" })),
        ),
        Err(_) => (StatusCode::OK, Json(json!({ "valid": false }))),
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
