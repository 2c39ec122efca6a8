use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::session::SessionConfig;
use crate::utils::errors::AppError;

/// Fixed validity window for session tokens: 7 days.
pub const SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Claims embedded in the signed session token.
///
/// Display fields (`email`, `account_id`, `full_name`, `school`) are copied
/// from the user record at issuance and are not re-read per request; they
/// can go stale until the next issuance. Deserialization is strict: a token
/// missing any field fails decoding outright instead of being coerced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub role: Option<String>,
    pub email: String,
    pub account_id: Option<String>,
    pub full_name: String,
    pub school: Option<String>,
    pub must_change_password: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Public profile fields the Session Issuer hands to the HTTP layer.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: uuid::Uuid,
    pub email: String,
    pub username: Option<String>,
    pub role: Option<String>,
    pub full_name: String,
    pub account_id: Option<String>,
    pub school: Option<String>,
    pub must_change_password: bool,
}

/// Sign a new session token for the given profile.
pub fn issue_session_token(
    profile: &UserProfile,
    config: &SessionConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();

    let claims = SessionClaims {
        sub: profile.id.to_string(),
        role: profile.role.clone(),
        email: profile.email.clone(),
        account_id: profile.account_id.clone(),
        full_name: profile.full_name.clone(),
        school: profile.school.clone(),
        must_change_password: profile.must_change_password,
        iat: now,
        exp: now + SESSION_TTL_SECS,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to sign session token: {}", e)))
}

/// Decode and verify a session token.
///
/// Structural corruption, signature mismatch, expiry, and schema violations
/// all collapse into the same 401; callers must treat any failure exactly
/// like a missing token.
pub fn decode_session_token(
    token: &str,
    config: &SessionConfig,
) -> Result<SessionClaims, AppError> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized())
}
