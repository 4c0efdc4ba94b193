//! Account Backend Module
//!
//! A user's account: the devices they use and their settings. Each user owns
//! at most one account, and only the owner may read or change it.
//!
//! Layout follows the `auth` crate:
//! - `domain/` - Account entity and storage port
//! - `application/` - Create / Get / Update use cases
//! - `infra/` - In-memory and PostgreSQL storage
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use domain::{Account, AccountFilter, AccountPatch, AccountStorage, Device, Settings};
pub use error::{AccountError, AccountResult};
pub use infra::{InMemoryAccountStorage, PgAccountStorage};
pub use presentation::router::account_router;
