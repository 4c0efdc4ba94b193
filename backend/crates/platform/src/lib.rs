//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Random secrets and Base64 helpers
//! - Password hashing (Argon2id) behind the [`password::CredentialHasher`] port
//! - Signed identity tokens ([`token::Authenticator`])

pub mod crypto;
pub mod password;
pub mod token;
