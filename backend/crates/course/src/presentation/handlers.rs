//! HTTP Handlers

use axum::extract::{Query, State};
use auth::{Identity, UserStorage};
use kernel::error::app_error::AppError;
use kernel::http::{Dispatch, JsonBody, PathId, dispatch};
use kernel::id::{UserId, markers};
use std::sync::Arc;

use crate::application::{
    GetCourseByIdUseCase, GetListUseCase, GetTeachersListInput, GetTeachersListUseCase,
    UploadCourseInput, UploadCourseUseCase,
};
use crate::domain::CourseStorage;
use crate::presentation::dto::{
    CourseListResponse, CourseResponse, TeachersListQuery, UploadCourseRequest,
    UploadCourseResponse,
};

/// Shared state for course handlers
pub struct CourseAppState<C, U>
where
    C: CourseStorage + Send + Sync + 'static,
    U: UserStorage + Send + Sync + 'static,
{
    pub courses: Arc<C>,
    pub users: Arc<U>,
}

impl<C, U> Clone for CourseAppState<C, U>
where
    C: CourseStorage + Send + Sync + 'static,
    U: UserStorage + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            courses: self.courses.clone(),
            users: self.users.clone(),
        }
    }
}

/// POST /course/new
pub async fn upload_course<C, U>(
    State(state): State<CourseAppState<C, U>>,
    identity: Identity,
    JsonBody(req): JsonBody<UploadCourseRequest>,
) -> Dispatch<UploadCourseResponse>
where
    C: CourseStorage + Send + Sync + 'static,
    U: UserStorage + Send + Sync + 'static,
{
    let use_case = UploadCourseUseCase::new(state.courses.clone(), state.users.clone());

    let input = UploadCourseInput {
        name: req.name,
        author: req.author,
        description: req.description,
        price: req.price,
        language: req.course_language,
    };

    let result = use_case
        .execute(&identity, input)
        .await
        .map(|out| UploadCourseResponse {
            id: out.id.into_uuid(),
            name: out.name,
            author: out.author,
        });

    dispatch("create course", result)
}

/// GET /course/teachers_list
pub async fn get_teachers_list<C, U>(
    State(state): State<CourseAppState<C, U>>,
    identity: Identity,
    Query(query): Query<TeachersListQuery>,
) -> Dispatch<CourseListResponse>
where
    C: CourseStorage + Send + Sync + 'static,
    U: UserStorage + Send + Sync + 'static,
{
    let teacher_id = match query.teacher_id.as_deref().map(str::parse::<UserId>) {
        None => None,
        Some(Ok(id)) => Some(id),
        Some(Err(e)) => {
            let err = AppError::bad_request("invalid teacherId parameter").with_source(e);
            return dispatch("get course list", Err::<CourseListResponse, _>(err));
        }
    };

    let result = GetTeachersListUseCase::new(state.courses.clone(), state.users.clone())
        .execute(&identity, GetTeachersListInput { teacher_id })
        .await
        .map(CourseListResponse::from);

    dispatch("get course list", result)
}

/// GET /course/list
pub async fn get_list<C, U>(State(state): State<CourseAppState<C, U>>) -> Dispatch<CourseListResponse>
where
    C: CourseStorage + Send + Sync + 'static,
    U: UserStorage + Send + Sync + 'static,
{
    let result = GetListUseCase::new(state.courses.clone())
        .execute()
        .await
        .map(CourseListResponse::from);

    dispatch("get course list", result)
}

/// GET /course/{id}
pub async fn get_course_by_id<C, U>(
    State(state): State<CourseAppState<C, U>>,
    PathId(id): PathId<markers::Course>,
) -> Dispatch<CourseResponse>
where
    C: CourseStorage + Send + Sync + 'static,
    U: UserStorage + Send + Sync + 'static,
{
    let result = GetCourseByIdUseCase::new(state.courses.clone())
        .execute(id)
        .await
        .map(CourseResponse::from);

    dispatch("get the course", result)
}
