use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::config::session::SESSION_COOKIE;
use crate::modules::auth::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::session::{SessionClaims, decode_session_token};

/// Extractor giving handlers the authenticated user's session claims.
///
/// The edge gate has already run by the time a handler sees this, but the
/// extractor re-verifies the cookie so a handler can never observe claims
/// the codec did not vouch for.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionClaims);

impl CurrentUser {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub).map_err(|_| AppError::unauthorized())
    }

    pub fn role(&self) -> Option<UserRole> {
        self.0.role.as_deref().and_then(UserRole::parse)
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(AppError::unauthorized)?;

        let claims = decode_session_token(&token, &state.session_config)?;

        Ok(CurrentUser(claims))
    }
}
