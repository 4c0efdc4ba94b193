//! In-Memory Storage
//!
//! `(name, author)` uniqueness is checked inside the write lock. Courses are
//! kept in upload order.

use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::{Course, CourseFilter, CourseStorage};
use crate::error::{CourseError, CourseResult};

/// In-memory course storage
#[derive(Debug, Default)]
pub struct InMemoryCourseStorage {
    courses: RwLock<Vec<Course>>,
}

impl InMemoryCourseStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored courses
    pub async fn len(&self) -> usize {
        self.courses.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.courses.read().await.is_empty()
    }
}

impl CourseStorage for InMemoryCourseStorage {
    async fn get_course(&self, filter: &CourseFilter) -> CourseResult<Option<Course>> {
        let courses = self.courses.read().await;
        Ok(courses.iter().find(|c| filter.matches(c)).cloned())
    }

    async fn create_course(&self, course: &Course) -> CourseResult<()> {
        let mut courses = self.courses.write().await;
        if courses.iter().any(|c| {
            c.id == course.id || (c.name == course.name && c.author == course.author)
        }) {
            return Err(CourseError::Duplicate);
        }
        courses.push(course.clone());
        Ok(())
    }

    async fn get_list_by_teacher_id(&self, teacher_id: UserId) -> CourseResult<Vec<Course>> {
        let courses = self.courses.read().await;
        Ok(courses
            .iter()
            .filter(|c| c.is_owned_by(teacher_id))
            .cloned()
            .collect())
    }

    async fn get_list(&self) -> CourseResult<Vec<Course>> {
        Ok(self.courses.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::CourseId;

    fn course(name: &str, author: &str, teacher_id: UserId) -> Course {
        Course {
            id: CourseId::new(),
            name: name.to_string(),
            author: author.to_string(),
            teacher_id,
            description: String::new(),
            price: 1.0,
            language: "en".to_string(),
        }
    }

    #[tokio::test]
    async fn test_name_and_author_unique() {
        let storage = InMemoryCourseStorage::new();
        let teacher = UserId::new();

        storage
            .create_course(&course("Go101", "A", teacher))
            .await
            .unwrap();
        let err = storage
            .create_course(&course("Go101", "A", UserId::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, CourseError::Duplicate));
        assert_eq!(storage.len().await, 1);
    }

    #[tokio::test]
    async fn test_filters() {
        let storage = InMemoryCourseStorage::new();
        let teacher = UserId::new();
        let first = course("Go101", "A", teacher);
        storage.create_course(&first).await.unwrap();
        storage
            .create_course(&course("Go101", "B", UserId::new()))
            .await
            .unwrap();

        let found = storage
            .get_course(&CourseFilter::by_name_and_author("Go101", "A"))
            .await
            .unwrap();
        assert_eq!(found.map(|c| c.id), Some(first.id));

        let by_teacher = storage.get_list_by_teacher_id(teacher).await.unwrap();
        assert_eq!(by_teacher.len(), 1);
        assert_eq!(storage.get_list().await.unwrap().len(), 2);

        let missing = storage
            .get_course(&CourseFilter::by_id(CourseId::new()))
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
