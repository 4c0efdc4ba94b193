//! Domain Layer
//!
//! Contains entities, value objects, and the storage port.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{identity::Identity, user::User};
pub use repository::{UserFilter, UserStorage};
pub use value_object::{email::Email, user_role::UserRole};
