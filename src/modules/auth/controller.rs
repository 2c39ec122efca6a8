use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde_json::{Value, json};

use crate::config::session::{SESSION_COOKIE, SessionConfig};
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::email::EmailService;
use crate::utils::errors::AppError;
use crate::utils::session::{UserProfile, issue_session_token};
use crate::validator::ValidatedJson;

use super::model::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, ResetPasswordRequest,
};
use super::service::AuthService;

fn session_cookie(token: String, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .path("/")
        .max_age(time::Duration::days(7))
        .build()
}

fn cleared_session_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

fn profile_json(profile: &UserProfile) -> Value {
    json!({
        "id": profile.id,
        "email": profile.email,
        "username": profile.username,
        "role": profile.role,
        "full_name": profile.full_name,
        "account_id": profile.account_id,
        "school": profile.school,
        "must_change_password": profile.must_change_password,
    })
}

/// POST /api/auth/login — verify credentials and set the session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<Value>), AppError> {
    let profile = AuthService::authenticate(
        &state.db,
        &state.credentials_config,
        &dto.identifier,
        &dto.password,
    )
    .await?;

    let token = issue_session_token(&profile, &state.session_config)?;
    let jar = jar.add(session_cookie(token, &state.session_config));

    Ok((
        jar,
        Json(json!({
            "ok": true,
            "message": "Login successful.",
            "user": profile_json(&profile),
        })),
    ))
}

/// POST /api/auth/logout — clear the cookie. The token itself stays valid
/// until expiry; there is no server-side revocation.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<Value>) {
    let jar = jar.add(cleared_session_cookie(&state.session_config));

    (
        jar,
        Json(json!({ "ok": true, "message": "Logged out." })),
    )
}

/// GET /api/auth/me — current claims plus the client-facing idle timeout
/// durations (enforced by the browser, not here).
pub async fn me(State(state): State<AppState>, user: CurrentUser) -> Json<Value> {
    Json(json!({
        "ok": true,
        "message": "OK.",
        "user": {
            "id": user.0.sub,
            "email": user.0.email,
            "role": user.0.role,
            "full_name": user.0.full_name,
            "account_id": user.0.account_id,
            "school": user.0.school,
            "must_change_password": user.0.must_change_password,
        },
        "idle_timeout_secs": state.session_config.idle_timeout_secs,
        "countdown_secs": state.session_config.countdown_secs,
    }))
}

/// POST /api/auth/forgot-password — always the same response, whether or
/// not the address exists.
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ForgotPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    let email_service = EmailService::new(state.email_config.clone());
    AuthService::forgot_password(&state.db, &email_service, &dto.email).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "If an account exists with that email, a reset link has been sent.",
    })))
}

/// POST /api/auth/reset-password — consume a reset token.
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<Value>, AppError> {
    AuthService::reset_password(&state.db, &dto.token, &dto.new_password).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "Password has been reset. You can now log in.",
    })))
}

/// POST /api/auth/change-password — verify the current password, store the
/// new hash, and re-issue the session cookie so the cleared
/// `must_change_password` claim takes effect immediately.
pub async fn change_password(
    State(state): State<AppState>,
    user: CurrentUser,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<ChangePasswordRequest>,
) -> Result<(CookieJar, Json<Value>), AppError> {
    let user_id = user.user_id()?;

    let profile = AuthService::change_password(
        &state.db,
        user_id,
        &dto.current_password,
        &dto.new_password,
    )
    .await?;

    let token = issue_session_token(&profile, &state.session_config)?;
    let jar = jar.add(session_cookie(token, &state.session_config));

    Ok((
        jar,
        Json(json!({ "ok": true, "message": "Password changed." })),
    ))
}
