//! Infrastructure Layer
//!
//! Storage adapters for the user port.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryUserStorage;
pub use postgres::PgUserStorage;
