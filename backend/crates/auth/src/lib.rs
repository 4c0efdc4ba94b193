//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User entity, request identity, storage port
//! - `application/` - Use cases and configuration
//! - `infra/` - In-memory and PostgreSQL storage
//! - `presentation/` - HTTP handlers, DTOs, router, auth gate
//!
//! ## Features
//! - Sign up with email + password as a student or a teacher
//! - Sign in returning a signed access token
//! - Token verification, both as an endpoint and as the gate in front of
//!   every protected route in the other crates
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Stateless HS256 access tokens carrying user id and name

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::{Email, Identity, User, UserFilter, UserRole, UserStorage};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryUserStorage, PgUserStorage};
pub use presentation::middleware::{require_auth, require_identity};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
