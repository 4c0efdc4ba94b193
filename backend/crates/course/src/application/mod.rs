//! Application Layer
//!
//! Course use cases.

pub mod get_course;
pub mod get_list;
pub mod get_teachers_list;
pub mod upload_course;

// Re-exports
pub use get_course::GetCourseByIdUseCase;
pub use get_list::GetListUseCase;
pub use get_teachers_list::{GetTeachersListInput, GetTeachersListUseCase};
pub use upload_course::{UploadCourseInput, UploadCourseOutput, UploadCourseUseCase};

use auth::{Identity, User, UserFilter, UserStorage};

use crate::error::{CourseError, CourseResult};

/// Resolve the caller to a stored user with the teacher role
pub(crate) async fn require_teacher<U>(users: &U, identity: &Identity) -> CourseResult<User>
where
    U: UserStorage,
{
    let user = users
        .get_user(&UserFilter::by_id(identity.user_id))
        .await?
        .ok_or(CourseError::UserNotFound)?;

    if !user.is_teacher() {
        tracing::info!(user_id = %user.id, role = %user.role, "Teacher role required");
        return Err(CourseError::TeacherRoleRequired);
    }

    Ok(user)
}

#[cfg(test)]
pub(crate) mod test_support {
    use auth::{Email, Identity, InMemoryUserStorage, User, UserRole, UserStorage};
    use platform::password::{Argon2Hasher, ClearTextPassword, CredentialHasher};

    /// Store a user with the given role and return their identity
    pub async fn register(users: &InMemoryUserStorage, email: &str, role: UserRole) -> Identity {
        let hash = Argon2Hasher::light()
            .generate_hash(&ClearTextPassword::new("pw".to_string()))
            .unwrap();
        let user = User::new("someone", Email::new(email).unwrap(), hash, role);
        users.create_user(&user).await.unwrap();
        Identity {
            user_id: user.id,
            user_name: user.username,
        }
    }
}
