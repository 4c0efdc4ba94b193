//! Upload Course Use Case
//!
//! The owning teacher is always the caller; the request body cannot name one.

use std::sync::Arc;

use auth::{Identity, UserStorage};
use kernel::id::CourseId;

use crate::application::require_teacher;
use crate::domain::{Course, CourseFilter, CourseStorage};
use crate::error::{CourseError, CourseResult};

/// Upload course input
pub struct UploadCourseInput {
    pub name: String,
    pub author: String,
    pub description: String,
    pub price: f64,
    pub language: String,
}

/// Upload course output
#[derive(Debug)]
pub struct UploadCourseOutput {
    pub id: CourseId,
    pub name: String,
    pub author: String,
}

/// Upload course use case
pub struct UploadCourseUseCase<C, U>
where
    C: CourseStorage,
    U: UserStorage,
{
    courses: Arc<C>,
    users: Arc<U>,
}

impl<C, U> UploadCourseUseCase<C, U>
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
        input: UploadCourseInput,
    ) -> CourseResult<UploadCourseOutput> {
        let teacher = require_teacher(self.users.as_ref(), identity).await?;

        let filter = CourseFilter::by_name_and_author(input.name.as_str(), input.author.as_str());
        if self.courses.get_course(&filter).await?.is_some() {
            tracing::info!(
                name = %input.name,
                author = %input.author,
                "Course already created"
            );
            return Err(CourseError::CourseAlreadyCreated);
        }

        let course = Course {
            id: CourseId::new(),
            name: input.name,
            author: input.author,
            teacher_id: teacher.id,
            description: input.description,
            price: input.price,
            language: input.language,
        };

        self.courses
            .create_course(&course)
            .await
            .map_err(|e| match e {
                CourseError::Duplicate => CourseError::CourseAlreadyCreated,
                other => other,
            })?;

        tracing::info!(
            course_id = %course.id,
            teacher_id = %course.teacher_id,
            "Course created"
        );

        Ok(UploadCourseOutput {
            id: course.id,
            name: course.name,
            author: course.author,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::register;
    use crate::infra::memory::InMemoryCourseStorage;
    use auth::{InMemoryUserStorage, UserRole};
    use kernel::id::UserId;

    /// Lookup misses a concurrently created course that the insert then hits
    struct RacedCourseStorage;

    impl CourseStorage for RacedCourseStorage {
        async fn get_course(&self, _filter: &CourseFilter) -> CourseResult<Option<Course>> {
            Ok(None)
        }

        async fn create_course(&self, _course: &Course) -> CourseResult<()> {
            Err(CourseError::Duplicate)
        }

        async fn get_list_by_teacher_id(&self, _teacher_id: UserId) -> CourseResult<Vec<Course>> {
            Ok(Vec::new())
        }

        async fn get_list(&self) -> CourseResult<Vec<Course>> {
            Ok(Vec::new())
        }
    }

    fn setup() -> (
        Arc<InMemoryCourseStorage>,
        Arc<InMemoryUserStorage>,
        UploadCourseUseCase<InMemoryCourseStorage, InMemoryUserStorage>,
    ) {
        let courses = Arc::new(InMemoryCourseStorage::new());
        let users = Arc::new(InMemoryUserStorage::new());
        let use_case = UploadCourseUseCase::new(courses.clone(), users.clone());
        (courses, users, use_case)
    }

    fn input(name: &str, author: &str) -> UploadCourseInput {
        UploadCourseInput {
            name: name.to_string(),
            author: author.to_string(),
            description: "intro".to_string(),
            price: 10.5,
            language: "en".to_string(),
        }
    }

    #[tokio::test]
    async fn test_teacher_uploads_course() {
        let (courses, users, use_case) = setup();
        let teacher = register(&users, "t@x.com", UserRole::Teacher).await;

        let out = use_case.execute(&teacher, input("Go101", "A")).await.unwrap();
        assert_eq!(out.name, "Go101");
        assert_eq!(out.author, "A");

        let stored = courses
            .get_course(&CourseFilter::by_id(out.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.teacher_id, teacher.user_id);
        assert_eq!(stored.price, 10.5);
    }

    #[tokio::test]
    async fn test_duplicate_name_and_author_rejected() {
        let (courses, users, use_case) = setup();
        let teacher = register(&users, "t@x.com", UserRole::Teacher).await;

        use_case.execute(&teacher, input("Go101", "A")).await.unwrap();
        let err = use_case
            .execute(&teacher, input("Go101", "A"))
            .await
            .unwrap_err();
        assert!(matches!(err, CourseError::CourseAlreadyCreated));
        assert_eq!(courses.len().await, 1);

        // Same name by another author is a different course
        use_case.execute(&teacher, input("Go101", "B")).await.unwrap();
        assert_eq!(courses.len().await, 2);
    }

    #[tokio::test]
    async fn test_duplicate_on_insert_maps_to_conflict() {
        let users = Arc::new(InMemoryUserStorage::new());
        let teacher = register(&users, "t@x.com", UserRole::Teacher).await;
        let use_case = UploadCourseUseCase::new(Arc::new(RacedCourseStorage), users);

        let err = use_case
            .execute(&teacher, input("Go101", "A"))
            .await
            .unwrap_err();
        assert!(matches!(err, CourseError::CourseAlreadyCreated));
    }

    #[tokio::test]
    async fn test_role_checked_before_duplicate() {
        let (courses, users, use_case) = setup();
        let teacher = register(&users, "t@x.com", UserRole::Teacher).await;
        let student = register(&users, "s@x.com", UserRole::Student).await;

        use_case.execute(&teacher, input("Go101", "A")).await.unwrap();
        let err = use_case
            .execute(&student, input("Go101", "A"))
            .await
            .unwrap_err();
        assert!(matches!(err, CourseError::TeacherRoleRequired));
        assert_eq!(courses.len().await, 1);
    }

    #[tokio::test]
    async fn test_student_cannot_upload() {
        let (courses, users, use_case) = setup();
        let student = register(&users, "s@x.com", UserRole::Student).await;

        let err = use_case
            .execute(&student, input("Go101", "A"))
            .await
            .unwrap_err();
        assert!(matches!(err, CourseError::TeacherRoleRequired));
        assert!(courses.is_empty().await);
    }

    #[tokio::test]
    async fn test_unknown_user_cannot_upload() {
        let (courses, _, use_case) = setup();
        let ghost = Identity {
            user_id: UserId::new(),
            user_name: "ghost".to_string(),
        };

        let err = use_case.execute(&ghost, input("Go101", "A")).await.unwrap_err();
        assert!(matches!(err, CourseError::UserNotFound));
        assert!(courses.is_empty().await);
    }
}
