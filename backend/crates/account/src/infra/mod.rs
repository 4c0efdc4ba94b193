//! Infrastructure Layer
//!
//! Storage adapters for the account port.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryAccountStorage;
pub use postgres::PgAccountStorage;
