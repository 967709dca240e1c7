use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::CredentialsError;
use crate::domain::auth::models::AccessToken;

pub mod health;
pub mod login;
pub mod me;
pub mod register;

/// Generic message for any failure the caller cannot act on.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Shared by "no such user" and "wrong password" so the two are indistinguishable.
pub const INVALID_LOGIN_MESSAGE: &str = "invalid email or password";

pub const INVALID_BODY_MESSAGE: &str = "invalid request body";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Conflict(String),
    Unauthorized(String),
    RequestTimeout(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::RequestTimeout(msg) => (StatusCode::REQUEST_TIMEOUT, msg),
        };

        (status, Json(ApiErrorBody { error: message })).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(e) => ApiError::BadRequest(e.to_string()),
            AuthError::UserAlreadyExists => ApiError::Conflict("email already exists".to_string()),
            AuthError::UserNotFound | AuthError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_LOGIN_MESSAGE.to_string())
            }
            AuthError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl From<CredentialsError> for ApiError {
    fn from(err: CredentialsError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Decode a JSON request body whatever its declared content type.
///
/// Only an unreadable body or one that does not decode is rejected.
pub(crate) fn decode_json_body<T: DeserializeOwned>(
    body: Result<Bytes, BytesRejection>,
) -> Result<T, ApiError> {
    let bytes = body.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Unreadable request body");
        ApiError::BadRequest(INVALID_BODY_MESSAGE.to_string())
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        ApiError::BadRequest(INVALID_BODY_MESSAGE.to_string())
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Body of successful register and login responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub token: String,
}

impl From<AccessToken> for TokenResponseData {
    fn from(token: AccessToken) -> Self {
        Self {
            token: token.into_inner(),
        }
    }
}
