//! Router Composition
//!
//! Wires every feature router onto one application router. Storage is
//! generic so the same composition serves PostgreSQL and in-memory setups.

use std::sync::Arc;

use account::{AccountStorage, account_router};
use auth::{UserStorage, auth_router};
use axum::http::{HeaderValue, Method, header};
use axum::{Json, Router, routing::get};
use course::{CourseStorage, course_router};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::CredentialHasher;
use platform::token::Authenticator;
use serde_json::{Value, json};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

/// Shared services handed to every feature router
pub struct Services<U, A, C> {
    pub users: Arc<U>,
    pub accounts: Arc<A>,
    pub courses: Arc<C>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub authenticator: Arc<Authenticator>,
}

/// Build the application router (without HTTP middleware)
pub fn router<U, A, C>(services: Services<U, A, C>) -> Router
where
    U: UserStorage + Send + Sync + 'static,
    A: AccountStorage + Send + Sync + 'static,
    C: CourseStorage + Send + Sync + 'static,
{
    let Services {
        users,
        accounts,
        courses,
        hasher,
        authenticator,
    } = services;

    Router::new()
        .route("/health", get(health))
        .nest(
            "/auth",
            auth_router(users.clone(), hasher, authenticator.clone()),
        )
        .merge(account_router(
            accounts,
            users.clone(),
            authenticator.clone(),
        ))
        .merge(course_router(courses, users, authenticator))
        .fallback(not_found)
}

/// CORS for the listed frontend origins
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> AppError {
    AppError::expected(ErrorKind::NotFound, "route not found", "route_not_found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use account::InMemoryAccountStorage;
    use auth::InMemoryUserStorage;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use course::InMemoryCourseStorage;
    use platform::password::Argon2Hasher;
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        courses: Arc<InMemoryCourseStorage>,
    }

    impl TestApp {
        fn new() -> Self {
            let courses = Arc::new(InMemoryCourseStorage::new());
            let authenticator = Arc::new(
                Authenticator::new(b"0123456789abcdef0123456789abcdef", chrono::Duration::hours(1))
                    .unwrap(),
            );
            let router = router(Services {
                users: Arc::new(InMemoryUserStorage::new()),
                accounts: Arc::new(InMemoryAccountStorage::new()),
                courses: courses.clone(),
                hasher: Arc::new(Argon2Hasher::light()),
                authenticator,
            });
            Self { router, courses }
        }

        async fn call(
            &self,
            method: &str,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
            }
            let body = match body {
                Some(json) => {
                    builder = builder.header(header::CONTENT_TYPE, "application/json");
                    Body::from(json.to_string())
                }
                None => Body::empty(),
            };
            let res = self
                .router
                .clone()
                .oneshot(builder.body(body).unwrap())
                .await
                .unwrap();
            let status = res.status();
            let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
            (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
        }

        /// Sign up and return `(user id, access token)`
        async fn sign_up(&self, email: &str, user_type: i16) -> (String, String) {
            let (status, body) = self
                .call(
                    "POST",
                    "/auth/signup",
                    None,
                    Some(json!({
                        "username": "someone",
                        "email": email,
                        "password": "secret",
                        "type": user_type
                    })),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
            (
                body["Id"].as_str().unwrap().to_string(),
                body["AccessToken"].as_str().unwrap().to_string(),
            )
        }
    }

    fn go101() -> Value {
        json!({"name": "Go101", "author": "A", "price": 10, "courseLanguage": "en"})
    }

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new();
        let (status, body) = app.call("GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = TestApp::new();
        let (status, body) = app.call("GET", "/nowhere", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "route_not_found");
    }

    #[tokio::test]
    async fn test_sign_up_then_verify() {
        let app = TestApp::new();
        let (id, token) = app.sign_up("x@y.z", 1).await;

        let (status, body) = app
            .call("POST", "/auth/verify", None, Some(json!({"accessToken": token})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["userId"], id.as_str());
        assert_eq!(body["username"], "someone");
    }

    #[tokio::test]
    async fn test_teacher_uploads_once() {
        let app = TestApp::new();
        let (_, token) = app.sign_up("t@y.z", 2).await;

        let (status, _) = app
            .call("POST", "/course/new", Some(&token), Some(go101()))
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, err) = app
            .call("POST", "/course/new", Some(&token), Some(go101()))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(err["code"], "course_already_created");
        assert_eq!(app.courses.len().await, 1);
    }

    #[tokio::test]
    async fn test_student_cannot_upload() {
        let app = TestApp::new();
        let (_, token) = app.sign_up("s@y.z", 1).await;

        let (status, err) = app
            .call("POST", "/course/new", Some(&token), Some(go101()))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(err["code"], "teacher_role_required");
        assert!(app.courses.is_empty().await);
    }

    #[tokio::test]
    async fn test_account_owned_by_creator_only() {
        let app = TestApp::new();
        let (user_a, token_a) = app.sign_up("a@y.z", 1).await;
        let (_, token_b) = app.sign_up("b@y.z", 1).await;

        let (status, created) = app
            .call(
                "POST",
                "/account",
                Some(&token_a),
                Some(json!({
                    "deviceName": "laptop",
                    "deviceOs": "linux",
                    "deviceMacAddress": "00:11:22:33:44:55",
                    "active": true,
                    "accountLanguage": "en"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["userId"], user_a.as_str());
        let uri = format!("/account/{}", created["id"].as_str().unwrap());

        let (status, err) = app.call("GET", &uri, Some(&token_b), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(err["code"], "account_access_denied");

        let (status, _) = app
            .call(
                "PATCH",
                &uri,
                Some(&token_b),
                Some(json!({"settings": {"language": "xx"}})),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, account) = app.call("GET", &uri, Some(&token_a), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(account["settings"]["language"], "en");
    }

    #[tokio::test]
    async fn test_public_catalogue_without_token() {
        let app = TestApp::new();
        let (status, body) = app.call("GET", "/course/list", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["courses"].as_array().unwrap().is_empty());

        let (status, err) = app.call("GET", "/course/teachers_list", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(err["code"], "missing_token");
    }
}
