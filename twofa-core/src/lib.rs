// File:    lib.rs
// Author:  apezoo
// Date:    2025-08-02
//
// Description: The main library crate for twofa-core, orchestrating seed decryption, encoding, and TOTP code handling.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! # 2FA Core Library
//!
//! This library protects a single 256-bit TOTP seed end-to-end: the seed
//! arrives RSA-encrypted from a trusted issuer, is decrypted and validated
//! once, persisted under restrictive permissions, and thereafter used to
//! generate and verify time-based one-time codes.

/// RSA-OAEP decryption of the issuer-encrypted seed.
pub mod cipher;
/// Error types shared across the library.
pub mod error;
/// Loading of PEM-encoded RSA key material.
pub mod keys;
/// The seed value type, its validation, and its base32 encoding.
pub mod seed;
/// High-level facade combining cipher, store, and TOTP engine.
pub mod service;
/// Persistence of the single decrypted seed.
pub mod store;
/// TOTP code generation and tolerant-window verification.
pub mod totp;

pub use error::AuthError;
pub use seed::{EncodedSeed, Seed};
pub use service::AuthService;
