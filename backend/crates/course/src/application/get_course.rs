//! Get Course By Id Use Case

use std::sync::Arc;

use kernel::id::CourseId;

use crate::domain::{Course, CourseFilter, CourseStorage};
use crate::error::{CourseError, CourseResult};

/// Get course by id use case
pub struct GetCourseByIdUseCase<C>
where
    C: CourseStorage,
{
    courses: Arc<C>,
}

impl<C> GetCourseByIdUseCase<C>
where
    C: CourseStorage,
{
    pub fn new(courses: Arc<C>) -> Self {
        Self { courses }
    }

    pub async fn execute(&self, id: CourseId) -> CourseResult<Course> {
        self.courses
            .get_course(&CourseFilter::by_id(id))
            .await?
            .ok_or(CourseError::CourseNotFound)
    }
}
