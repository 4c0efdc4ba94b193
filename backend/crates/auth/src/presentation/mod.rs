//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the auth gate.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{require_auth, require_identity};
pub use router::auth_router;
