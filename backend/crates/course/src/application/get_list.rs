//! Get List Use Case

use std::sync::Arc;

use crate::domain::{Course, CourseStorage};
use crate::error::CourseResult;

/// Public course listing
pub struct GetListUseCase<C>
where
    C: CourseStorage,
{
    courses: Arc<C>,
}

impl<C> GetListUseCase<C>
where
    C: CourseStorage,
{
    pub fn new(courses: Arc<C>) -> Self {
        Self { courses }
    }

    pub async fn execute(&self) -> CourseResult<Vec<Course>> {
        self.courses.get_list().await
    }
}
