//! Storage Port

use kernel::id::{CourseId, UserId};

use crate::domain::entity::Course;
use crate::error::CourseResult;

/// Lookup filter for [`CourseStorage::get_course`]
///
/// Every field that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub id: Option<CourseId>,
    pub name: Option<String>,
    pub author: Option<String>,
}

impl CourseFilter {
    pub fn by_id(id: CourseId) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn by_name_and_author(name: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            author: Some(author.into()),
            ..Default::default()
        }
    }

    /// Whether `course` satisfies every set field
    pub fn matches(&self, course: &Course) -> bool {
        self.id.is_none_or(|id| id == course.id)
            && self.name.as_ref().is_none_or(|name| *name == course.name)
            && self
                .author
                .as_ref()
                .is_none_or(|author| *author == course.author)
    }
}

/// Course storage port
#[trait_variant::make(CourseStorage: Send)]
pub trait LocalCourseStorage {
    /// Find the first course matching the filter
    async fn get_course(&self, filter: &CourseFilter) -> CourseResult<Option<Course>>;

    /// Persist a new course
    ///
    /// Fails with [`CourseError::Duplicate`](crate::error::CourseError::Duplicate)
    /// when `(name, author)` is taken.
    async fn create_course(&self, course: &Course) -> CourseResult<()>;

    /// Courses uploaded by `teacher_id`, oldest first
    async fn get_list_by_teacher_id(&self, teacher_id: UserId) -> CourseResult<Vec<Course>>;

    /// Every course, oldest first
    async fn get_list(&self) -> CourseResult<Vec<Course>>;
}
