use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::TokenProvider;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates bearer tokens and adds the caller to request extensions.
///
/// Identifies the caller only; authorization is left to the protected handler.
pub async fn authenticate<AS, TP>(
    State(state): State<AppState<AS, TP>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    AS: AuthServicePort,
    TP: TokenProvider,
{
    let token = extract_token_from_header(&req)?;

    let user_id = state.tokens.validate(token).map_err(|_| {
        tracing::warn!("Bearer token rejected");
        ApiError::Unauthorized("invalid token".to_string())
    })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let missing = || ApiError::Unauthorized("missing token".to_string());

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(missing)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("invalid token".to_string()))?;

    if auth_str.trim_end() == "Bearer" {
        return Err(missing());
    }

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("invalid token".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(missing());
    }

    Ok(token)
}
