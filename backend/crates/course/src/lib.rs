//! Course Backend Module
//!
//! Course catalogue. Teachers upload courses, anyone can browse them, and a
//! teacher can list the courses they own.
//!
//! Layout follows the `auth` crate:
//! - `domain/` - Course entity and storage port
//! - `application/` - Upload / Get / List use cases
//! - `infra/` - In-memory and PostgreSQL storage
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use domain::{Course, CourseFilter, CourseStorage};
pub use error::{CourseError, CourseResult};
pub use infra::{InMemoryCourseStorage, PgCourseStorage};
pub use presentation::router::course_router;
