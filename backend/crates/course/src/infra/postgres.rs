//! PostgreSQL Storage Implementation

use sqlx::PgPool;
use uuid::Uuid;

use kernel::id::{CourseId, UserId};

use crate::domain::{Course, CourseFilter, CourseStorage};
use crate::error::{CourseError, CourseResult};

/// Unique violation
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed course storage
#[derive(Clone)]
pub struct PgCourseStorage {
    pool: PgPool,
}

impl PgCourseStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CourseStorage for PgCourseStorage {
    async fn get_course(&self, filter: &CourseFilter) -> CourseResult<Option<Course>> {
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT
                course_id,
                name,
                author,
                teacher_id,
                description,
                price,
                course_language
            FROM courses
            WHERE ($1::uuid IS NULL OR course_id = $1)
              AND ($2::text IS NULL OR name = $2)
              AND ($3::text IS NULL OR author = $3)
            LIMIT 1
            "#,
        )
        .bind(filter.id.map(CourseId::into_uuid))
        .bind(filter.name.as_deref())
        .bind(filter.author.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CourseRow::into_course))
    }

    async fn create_course(&self, course: &Course) -> CourseResult<()> {
        sqlx::query(
            r#"
            INSERT INTO courses (
                course_id,
                name,
                author,
                teacher_id,
                description,
                price,
                course_language
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(course.id.into_uuid())
        .bind(&course.name)
        .bind(&course.author)
        .bind(course.teacher_id.into_uuid())
        .bind(&course.description)
        .bind(course.price)
        .bind(&course.language)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(())
    }

    async fn get_list_by_teacher_id(&self, teacher_id: UserId) -> CourseResult<Vec<Course>> {
        let rows = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT
                course_id,
                name,
                author,
                teacher_id,
                description,
                price,
                course_language
            FROM courses
            WHERE teacher_id = $1
            ORDER BY created_at, course_id
            "#,
        )
        .bind(teacher_id.into_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CourseRow::into_course).collect())
    }

    async fn get_list(&self) -> CourseResult<Vec<Course>> {
        let rows = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT
                course_id,
                name,
                author,
                teacher_id,
                description,
                price,
                course_language
            FROM courses
            ORDER BY created_at, course_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CourseRow::into_course).collect())
    }
}

fn map_unique_violation(err: sqlx::Error) -> CourseError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            CourseError::Duplicate
        }
        _ => CourseError::Database(err),
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CourseRow {
    course_id: Uuid,
    name: String,
    author: String,
    teacher_id: Uuid,
    description: String,
    price: f64,
    course_language: String,
}

impl CourseRow {
    fn into_course(self) -> Course {
        Course {
            id: CourseId::from_uuid(self.course_id),
            name: self.name,
            author: self.author,
            teacher_id: UserId::from_uuid(self.teacher_id),
            description: self.description,
            price: self.price,
            language: self.course_language,
        }
    }
}
