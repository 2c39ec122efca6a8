//! Edge access gate.
//!
//! Evaluated for every inbound request before route dispatch. The decision
//! logic is a pure function of the request path and the decoded session
//! claims; the middleware wrapper only decodes the cookie and renders the
//! decision. Rules are checked in strict order and the first match wins.

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde_json::json;

use crate::config::session::SESSION_COOKIE;
use crate::modules::auth::model::UserRole;
use crate::state::AppState;
use crate::utils::session::{SessionClaims, decode_session_token};

/// Framework-internal and static asset prefixes that skip all checks.
const BYPASS_PREFIXES: &[&str] = &["/_next", "/favicon", "/assets", "/public"];

/// Pages reachable without a session.
const PUBLIC_PAGES: &[&str] = &["/", "/reset-password"];

/// API endpoints reachable without a session.
const PUBLIC_APIS: &[&str] = &[
    "/api/auth/login",
    "/api/auth/forgot-password",
    "/api/auth/reset-password",
];

const ADMIN_PREFIX: &str = "/super-admin";
const TEACHER_PREFIX: &str = "/teacher";
const CHANGE_PASSWORD_PAGE: &str = "/change-password";
const CHANGE_PASSWORD_API: &str = "/api/auth/change-password";
const LANDING_PAGE: &str = "/";

/// Outcome of the gate. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Redirect(&'static str),
    Deny(StatusCode, &'static str),
}

fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

/// Decide what happens to a request.
///
/// `claims` is `None` for both "no cookie" and "cookie failed to decode";
/// the two cases are deliberately indistinguishable from here on.
pub fn evaluate(path: &str, claims: Option<&SessionClaims>) -> AccessDecision {
    if BYPASS_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return AccessDecision::Allow;
    }

    if PUBLIC_PAGES.contains(&path) || PUBLIC_APIS.contains(&path) {
        return AccessDecision::Allow;
    }

    let Some(claims) = claims else {
        return if is_api_path(path) {
            AccessDecision::Deny(StatusCode::UNAUTHORIZED, "Unauthorized.")
        } else {
            AccessDecision::Redirect(LANDING_PAGE)
        };
    };

    // The change page and the endpoint it posts to are the only way out of
    // the forced-change state; both must stay reachable.
    if claims.must_change_password
        && path != CHANGE_PASSWORD_PAGE
        && path != CHANGE_PASSWORD_API
    {
        return AccessDecision::Redirect(CHANGE_PASSWORD_PAGE);
    }

    let role = claims.role.as_deref().and_then(UserRole::parse);

    if path.starts_with(ADMIN_PREFIX) && role != Some(UserRole::Admin) {
        return AccessDecision::Redirect(LANDING_PAGE);
    }

    if path.starts_with(TEACHER_PREFIX) && role != Some(UserRole::Teacher) {
        return AccessDecision::Redirect(LANDING_PAGE);
    }

    AccessDecision::Allow
}

/// Router-wide middleware applying [`evaluate`] before any handler runs.
pub async fn access_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let claims = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| decode_session_token(cookie.value(), &state.session_config).ok());

    match evaluate(req.uri().path(), claims.as_ref()) {
        AccessDecision::Allow => next.run(req).await,
        AccessDecision::Redirect(to) => Redirect::temporary(to).into_response(),
        AccessDecision::Deny(status, message) => (
            status,
            Json(json!({ "ok": false, "message": message })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: Option<&str>, must_change_password: bool) -> SessionClaims {
        SessionClaims {
            sub: uuid::Uuid::new_v4().to_string(),
            role: role.map(|r| r.to_string()),
            email: "user@example.com".to_string(),
            account_id: Some("AJS-001".to_string()),
            full_name: "Test User".to_string(),
            school: None,
            must_change_password,
            iat: 1_700_000_000,
            exp: 9_999_999_999,
        }
    }

    #[test]
    fn test_static_bypass_wins_without_session() {
        assert_eq!(evaluate("/_next/static/chunk.js", None), AccessDecision::Allow);
        assert_eq!(evaluate("/favicon.ico", None), AccessDecision::Allow);
        assert_eq!(evaluate("/assets/logo.png", None), AccessDecision::Allow);
        assert_eq!(evaluate("/public/robots.txt", None), AccessDecision::Allow);
    }

    #[test]
    fn test_public_paths_allowed_without_session() {
        assert_eq!(evaluate("/", None), AccessDecision::Allow);
        assert_eq!(evaluate("/reset-password", None), AccessDecision::Allow);
        assert_eq!(evaluate("/api/auth/login", None), AccessDecision::Allow);
        assert_eq!(evaluate("/api/auth/forgot-password", None), AccessDecision::Allow);
        assert_eq!(evaluate("/api/auth/reset-password", None), AccessDecision::Allow);
    }

    #[test]
    fn test_missing_session_on_api_denies_401() {
        assert_eq!(
            evaluate("/api/admin/schools", None),
            AccessDecision::Deny(StatusCode::UNAUTHORIZED, "Unauthorized.")
        );
    }

    #[test]
    fn test_missing_session_on_page_redirects_to_landing() {
        assert_eq!(
            evaluate("/super-admin/dashboard", None),
            AccessDecision::Redirect("/")
        );
        assert_eq!(evaluate("/change-password", None), AccessDecision::Redirect("/"));
    }

    #[test]
    fn test_must_change_password_forces_redirect_regardless_of_role() {
        let admin = claims(Some("admin"), true);
        assert_eq!(
            evaluate("/super-admin/dashboard", Some(&admin)),
            AccessDecision::Redirect("/change-password")
        );

        let teacher = claims(Some("teacher"), true);
        assert_eq!(
            evaluate("/teacher/classes", Some(&teacher)),
            AccessDecision::Redirect("/change-password")
        );
    }

    #[test]
    fn test_must_change_password_allows_the_change_page_itself() {
        let user = claims(Some("teacher"), true);
        assert_eq!(evaluate("/change-password", Some(&user)), AccessDecision::Allow);
    }

    #[test]
    fn test_must_change_password_allows_the_change_password_api() {
        let user = claims(Some("teacher"), true);
        assert_eq!(
            evaluate("/api/auth/change-password", Some(&user)),
            AccessDecision::Allow
        );

        // Other API paths are still pulled back to the change page.
        assert_eq!(
            evaluate("/api/auth/me", Some(&user)),
            AccessDecision::Redirect("/change-password")
        );
    }

    #[test]
    fn test_admin_area_requires_admin_role() {
        let teacher = claims(Some("teacher"), false);
        assert_eq!(
            evaluate("/super-admin/dashboard", Some(&teacher)),
            AccessDecision::Redirect("/")
        );

        let no_role = claims(None, false);
        assert_eq!(
            evaluate("/super-admin/dashboard", Some(&no_role)),
            AccessDecision::Redirect("/")
        );

        let admin = claims(Some("admin"), false);
        assert_eq!(evaluate("/super-admin/dashboard", Some(&admin)), AccessDecision::Allow);
    }

    #[test]
    fn test_teacher_area_requires_teacher_role() {
        let clerk = claims(Some("clerk"), false);
        assert_eq!(evaluate("/teacher/classes", Some(&clerk)), AccessDecision::Redirect("/"));

        let teacher = claims(Some("teacher"), false);
        assert_eq!(evaluate("/teacher/classes", Some(&teacher)), AccessDecision::Allow);
    }

    #[test]
    fn test_valid_session_passes_ordinary_paths() {
        let student = claims(Some("student"), false);
        assert_eq!(evaluate("/dashboard", Some(&student)), AccessDecision::Allow);
        assert_eq!(evaluate("/api/students", Some(&student)), AccessDecision::Allow);
    }
}
