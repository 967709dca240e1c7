use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::error_handling::HandleErrorLayer;
use axum::http::Request;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Json;
use axum::Router;
use tower::timeout::error::Elapsed;
use tower::timeout::TimeoutLayer;
use tower::BoxError;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::me::me;
use super::handlers::register::register;
use super::handlers::ApiError;
use super::handlers::ApiErrorBody;
use super::handlers::INTERNAL_ERROR_MESSAGE;
use super::middleware::authenticate;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::TokenProvider;

pub struct AppState<AS, TP> {
    pub auth_service: Arc<AS>,
    pub tokens: Arc<TP>,
}

impl<AS, TP> Clone for AppState<AS, TP> {
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

pub fn create_router<AS, TP>(
    auth_service: Arc<AS>,
    tokens: Arc<TP>,
    request_timeout: Duration,
) -> Router
where
    AS: AuthServicePort,
    TP: TokenProvider,
{
    let state = AppState {
        auth_service,
        tokens,
    };

    let public_routes = Router::new()
        .route("/register", post(register::<AS, TP>))
        .route("/login", post(login::<AS, TP>))
        .route("/health", get(health));

    let protected_routes = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate::<AS, TP>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn handle_timeout(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        tracing::warn!("Request deadline exceeded");
        ApiError::RequestTimeout("request timed out".to_string())
    } else {
        tracing::error!(error = %err, "Request failed in middleware");
        ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
    }
}

/// Turns a handler panic into the generic 500 body.
pub(crate) fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiErrorBody {
            error: INTERNAL_ERROR_MESSAGE.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use auth::HashCost;
    use auth::PasswordHasher;
    use auth::TokenManager;
    use axum::http::header;
    use serde_json::json;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::auth::errors::AuthError;
    use crate::domain::auth::models::AccessToken;
    use crate::domain::auth::models::Credentials;
    use crate::domain::auth::service::AuthService;
    use crate::outbound::repositories::InMemoryUserRepository;

    const SECRET: &[u8] = b"router-test-secret-at-least-32-bytes!!";

    fn app() -> Router {
        let hasher = PasswordHasher::with_cost(HashCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        let tokens = Arc::new(TokenManager::new(SECRET, chrono::Duration::minutes(5)));
        let service = AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(hasher),
            Arc::clone(&tokens),
        );

        create_router(Arc::new(service), tokens, Duration::from_secs(5))
    }

    /// Auth service that never answers within a short deadline
    struct StalledAuthService;

    #[async_trait::async_trait]
    impl AuthServicePort for StalledAuthService {
        async fn register(&self, _credentials: Credentials) -> Result<AccessToken, AuthError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(AccessToken("late".to_string()))
        }

        async fn login(&self, _credentials: Credentials) -> Result<AccessToken, AuthError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(AccessToken("late".to_string()))
        }
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_register_then_me() {
        let app = app();

        let response = app
            .clone()
            .oneshot(json_request(
                "/register",
                json!({ "email": "a@example.com", "password": "pw1" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let token = body_json(response).await["token"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .oneshot(
                Request::get("/me")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "user_id": 1 }));
    }

    #[tokio::test]
    async fn test_me_requires_token() {
        let response = app()
            .oneshot(Request::get("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await, json!({ "error": "missing token" }));
    }

    #[tokio::test]
    async fn test_me_rejects_garbage_token() {
        let response = app()
            .oneshot(
                Request::get("/me")
                    .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await, json!({ "error": "invalid token" }));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let response = app()
            .oneshot(
                Request::post("/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "invalid request body" })
        );
    }

    #[tokio::test]
    async fn test_body_without_content_type_is_accepted() {
        let response = app()
            .oneshot(
                Request::post("/register")
                    .body(Body::from(r#"{"email":"a@b.com","password":"pw123456"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(body_json(response).await["token"].is_string());
    }

    #[tokio::test]
    async fn test_request_deadline_answers_json() {
        let tokens = Arc::new(TokenManager::new(SECRET, chrono::Duration::minutes(5)));
        let app = create_router(
            Arc::new(StalledAuthService),
            tokens,
            Duration::from_millis(1),
        );

        let response = app
            .oneshot(json_request(
                "/register",
                json!({ "email": "a@b.com", "password": "pw123456" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(
            body_json(response).await,
            json!({ "error": "request timed out" })
        );
    }

    #[tokio::test]
    async fn test_panic_response() {
        let response = handle_panic(Box::new("boom"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": INTERNAL_ERROR_MESSAGE })
        );
    }
}
