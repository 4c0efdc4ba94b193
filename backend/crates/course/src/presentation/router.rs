//! Course Router

use auth::{UserStorage, require_auth};
use axum::{
    Router,
    routing::{get, post},
};
use platform::token::Authenticator;
use std::sync::Arc;

use crate::domain::CourseStorage;
use crate::presentation::handlers::{self, CourseAppState};

/// Create the Course router
///
/// `/course/new` and `/course/teachers_list` require a bearer token; the
/// catalogue routes are public.
pub fn course_router<C, U>(
    courses: Arc<C>,
    users: Arc<U>,
    authenticator: Arc<Authenticator>,
) -> Router
where
    C: CourseStorage + Send + Sync + 'static,
    U: UserStorage + Send + Sync + 'static,
{
    let state = CourseAppState { courses, users };

    let protected = Router::new()
        .route("/course/new", post(handlers::upload_course::<C, U>))
        .route(
            "/course/teachers_list",
            get(handlers::get_teachers_list::<C, U>),
        )
        .with_state(state.clone());

    let public = Router::new()
        .route("/course/list", get(handlers::get_list::<C, U>))
        .route("/course/{id}", get(handlers::get_course_by_id::<C, U>))
        .with_state(state);

    public.merge(require_auth(protected, authenticator))
}
