//! API DTOs (Data Transfer Objects)

use std::borrow::Cow;

use kernel::http::Validate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Course;

// ============================================================================
// Upload Course
// ============================================================================

/// Upload course request
///
/// Carries no teacher id; the owner is the authenticated caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadCourseRequest {
    pub name: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub course_language: String,
}

impl Validate for UploadCourseRequest {
    fn validate(&self) -> Result<(), Cow<'static, str>> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".into());
        }
        if self.author.trim().is_empty() {
            return Err("author must not be empty".into());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("price must be a non-negative number".into());
        }
        Ok(())
    }
}

/// Upload course response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadCourseResponse {
    pub id: Uuid,
    pub name: String,
    pub author: String,
}

// ============================================================================
// Course views
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: Uuid,
    pub name: String,
    pub author: String,
    pub teacher_id: Uuid,
    pub description: String,
    pub price: f64,
    pub course_language: String,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id.into_uuid(),
            name: course.name,
            author: course.author,
            teacher_id: course.teacher_id.into_uuid(),
            description: course.description,
            price: course.price,
            course_language: course.language,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseListResponse {
    pub courses: Vec<CourseResponse>,
}

impl From<Vec<Course>> for CourseListResponse {
    fn from(courses: Vec<Course>) -> Self {
        Self {
            courses: courses.into_iter().map(Into::into).collect(),
        }
    }
}

/// `GET /course/teachers_list?teacherId=...`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeachersListQuery {
    pub teacher_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, author: &str, price: f64) -> UploadCourseRequest {
        UploadCourseRequest {
            name: name.to_string(),
            author: author.to_string(),
            description: String::new(),
            price,
            course_language: "en".to_string(),
        }
    }

    #[test]
    fn test_upload_validation() {
        assert!(request("Go101", "A", 0.0).validate().is_ok());
        assert!(request(" ", "A", 1.0).validate().is_err());
        assert!(request("Go101", "", 1.0).validate().is_err());
        assert!(request("Go101", "A", -1.0).validate().is_err());
        assert!(request("Go101", "A", f64::NAN).validate().is_err());
    }

    #[test]
    fn test_teacher_id_ignored_in_body() {
        let req: UploadCourseRequest = serde_json::from_str(
            r#"{"name":"Go101","author":"A","price":5,"teacherId":"someone-else"}"#,
        )
        .unwrap();
        assert_eq!(req.name, "Go101");
        assert_eq!(req.price, 5.0);
    }
}
