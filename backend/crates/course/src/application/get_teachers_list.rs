//! Get Teachers List Use Case
//!
//! A teacher may list only their own courses.

use std::sync::Arc;

use auth::{Identity, UserStorage};
use kernel::id::UserId;

use crate::application::require_teacher;
use crate::domain::{Course, CourseStorage};
use crate::error::{CourseError, CourseResult};

/// Get teachers list input
#[derive(Debug, Default)]
pub struct GetTeachersListInput {
    /// Teacher being listed; the caller when absent
    pub teacher_id: Option<UserId>,
}

/// Get teachers list use case
pub struct GetTeachersListUseCase<C, U>
where
    C: CourseStorage,
    U: UserStorage,
{
    courses: Arc<C>,
    users: Arc<U>,
}

impl<C, U> GetTeachersListUseCase<C, U>
where
    C: CourseStorage,
    U: UserStorage,
{
    pub fn new(courses: Arc<C>, users: Arc<U>) -> Self {
        Self { courses, users }
    }

    pub async fn execute(
        &self,
        identity: &Identity,
        input: GetTeachersListInput,
    ) -> CourseResult<Vec<Course>> {
        if input
            .teacher_id
            .is_some_and(|teacher_id| teacher_id != identity.user_id)
        {
            tracing::warn!(
                user_id = %identity.user_id,
                "Teacher list access denied"
            );
            return Err(CourseError::TeacherAccessDenied);
        }

        let teacher = require_teacher(self.users.as_ref(), identity).await?;

        self.courses.get_list_by_teacher_id(teacher.id).await
    }
}
