use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

/// Application error carried out of services and middleware.
///
/// Rendered as the standard `{ ok: false, message }` envelope. Server-side
/// failures (5xx) are logged with full detail and masked in the response.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    /// 401 with the fixed generic message. Missing, invalid, and expired
    /// tokens must all look the same to the client.
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!("Unauthorized."))
    }

    /// 401 for the login flow. Unknown identifier and wrong password share
    /// this message and status.
    pub fn invalid_credentials() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            anyhow::anyhow!("Invalid credentials."),
        )
    }

    /// 403 with the fixed generic message.
    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!("Forbidden."))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
            "Something went wrong.".to_string()
        } else {
            self.error.to_string()
        };

        let body = Json(json!({
            "ok": false,
            "message": message,
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
