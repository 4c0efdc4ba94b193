//! Domain Layer

pub mod entity;
pub mod repository;

// Re-exports
pub use entity::Course;
pub use repository::{CourseFilter, CourseStorage};
