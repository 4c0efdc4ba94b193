//! Domain Layer
//!
//! Account entity and the storage port.

pub mod entity;
pub mod repository;

// Re-exports
pub use entity::{Account, AccountPatch, Device, Settings};
pub use repository::{AccountFilter, AccountStorage};
