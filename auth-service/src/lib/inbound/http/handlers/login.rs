use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::decode_json_body;
use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::auth::errors::CredentialsError;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::TokenProvider;
use crate::inbound::http::router::AppState;

pub async fn login<AS, TP>(
    State(state): State<AppState<AS, TP>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError>
where
    AS: AuthServicePort,
    TP: TokenProvider,
{
    let body: LoginRequestBody = decode_json_body(body)?;

    state
        .auth_service
        .login(body.try_into_credentials()?)
        .await
        .map_err(|e| {
            tracing::info!(reason = %e, "Login rejected");
            ApiError::from(e)
        })
        .map(|token| ApiSuccess::new(StatusCode::OK, token.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl LoginRequestBody {
    fn try_into_credentials(self) -> Result<Credentials, CredentialsError> {
        Credentials::new(self.email, self.password)
    }
}
