//! Infrastructure Layer
//!
//! Storage adapters for the course port.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCourseStorage;
pub use postgres::PgCourseStorage;
