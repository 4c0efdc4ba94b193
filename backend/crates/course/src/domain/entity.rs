//! Course Entity

use kernel::id::{CourseId, UserId};

/// Course entity
///
/// `teacher_id` is the teacher who uploaded it. `(name, author)` is unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub author: String,
    pub teacher_id: UserId,
    pub description: String,
    pub price: f64,
    pub language: String,
}

impl Course {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.teacher_id == user_id
    }
}
