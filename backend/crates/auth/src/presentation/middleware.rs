//! Auth Gate
//!
//! Middleware that resolves the caller's [`Identity`] from a bearer token
//! before a protected handler runs, and the extractor handlers use to read it.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;
use platform::token::Authenticator;

use crate::application::VerifyTokenUseCase;
use crate::domain::entity::identity::Identity;
use crate::error::AuthError;

/// Middleware that requires a valid bearer token
///
/// Rejects with `missing_token` or `invalid_token`; on success the verified
/// [`Identity`] is placed in the request extensions.
pub async fn require_identity(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(req.headers()).ok_or(AuthError::MissingToken)?;
    let identity = VerifyTokenUseCase::new(authenticator).identify(token)?;

    tracing::debug!(user_id = %identity.user_id, "Request authenticated");
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Put every route already on `router` behind [`require_identity`]
///
/// Uses `route_layer`, so unknown paths still 404 instead of 401.
pub fn require_auth<S>(router: Router<S>, authenticator: Arc<Authenticator>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(from_fn_with_state(authenticator, require_identity))
}

/// `Authorization: Bearer <token>`, trimmed; `None` if absent or empty
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::routing::get;
    use platform::token::TokenSubject;
    use tower::ServiceExt;

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(
            Authenticator::new(b"0123456789abcdef0123456789abcdef", chrono::Duration::hours(1))
                .unwrap(),
        )
    }

    async fn whoami(identity: Identity) -> String {
        identity.user_name
    }

    fn app(authenticator: Arc<Authenticator>) -> Router {
        let protected = Router::new().route("/me", get(whoami));
        Router::new()
            .merge(require_auth(protected, authenticator))
            .route("/open", get(|| async { "open" }))
    }

    async fn call(app: Router, auth: Option<&str>, uri: &str) -> (StatusCode, String) {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let res = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Bearer abc ".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc"));

        // Scheme is case-insensitive
        for value in ["bearer abc", "BEARER abc", "bEaReR abc"] {
            headers.insert(header::AUTHORIZATION, value.parse().unwrap());
            assert_eq!(bearer_token(&headers), Some("abc"));
        }

        headers.insert(header::AUTHORIZATION, "Bearerabc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Bearer   ".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }

    #[tokio::test]
    async fn test_missing_token_rejected() {
        let (status, body) = call(app(authenticator()), None, "/me").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["message"], "missing token");
        assert_eq!(json["code"], "missing_token");
    }

    #[tokio::test]
    async fn test_invalid_token_rejected() {
        let (status, body) = call(app(authenticator()), Some("Bearer nope"), "/me").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["code"], "invalid_token");
    }

    #[tokio::test]
    async fn test_valid_token_injects_identity() {
        let auth = authenticator();
        let token = auth
            .generate_token(&TokenSubject {
                user_id: uuid::Uuid::new_v4(),
                user_name: "ada".to_string(),
            })
            .unwrap();

        let (status, body) = call(app(auth), Some(&format!("Bearer {}", token)), "/me").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ada");
    }

    #[tokio::test]
    async fn test_unprotected_route_skips_gate() {
        let (status, body) = call(app(authenticator()), None, "/open").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "open");
    }

    #[tokio::test]
    async fn test_identity_extractor_without_gate() {
        let app = Router::new().route("/me", get(whoami));
        let (status, _) = call(app, None, "/me").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
