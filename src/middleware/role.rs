//! Per-resource authorization checks.
//!
//! These run inside handlers after the edge gate has already passed: the
//! gate knows paths and claims, these know data. Both return an error value
//! the handler propagates as the response; nothing is processed past a
//! denial.

use axum::http::StatusCode;
use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::modules::auth::model::UserRole;
use crate::utils::errors::AppError;

/// Deny with 403 unless the user's role is in `allowed`.
pub fn require_role(user: &CurrentUser, allowed: &[UserRole]) -> Result<(), AppError> {
    let role = user.role().ok_or_else(AppError::forbidden)?;

    if !allowed.contains(&role) {
        return Err(AppError::forbidden());
    }

    Ok(())
}

/// Look up the active school-admin relationship for a user.
///
/// Returns the administered school's id, or 403 when no active row exists.
/// This is the data-dependent check the edge gate cannot perform.
pub async fn require_school_admin(db: &PgPool, user_id: Uuid) -> Result<Uuid, AppError> {
    sqlx::query_scalar::<_, Uuid>(
        "SELECT school_id FROM school_admins WHERE user_id = $1 AND status = 'active' LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?
    .ok_or_else(AppError::forbidden)
}

/// Deny with 403 unless the user may administer `school_id`.
///
/// Global admins pass outright; everyone else needs an active school-admin
/// row for that exact school.
pub async fn ensure_school_admin(
    db: &PgPool,
    user: &CurrentUser,
    school_id: Uuid,
) -> Result<(), AppError> {
    if user.role() == Some(UserRole::Admin) {
        return Ok(());
    }

    let user_id = user.user_id()?;

    sqlx::query_scalar::<_, i32>(
        "SELECT 1 FROM school_admins
         WHERE user_id = $1 AND school_id = $2 AND status = 'active'",
    )
    .bind(user_id)
    .bind(school_id)
    .fetch_optional(db)
    .await?
    .map(|_| ())
    .ok_or_else(AppError::forbidden)
}

/// Tenant check for handlers that already loaded a row by id. A denial is
/// reported as "`resource` not found" so probing foreign ids reveals
/// nothing about which ids exist in other schools.
pub async fn ensure_school_record_access(
    db: &PgPool,
    user: &CurrentUser,
    school_id: Uuid,
    resource: &'static str,
) -> Result<(), AppError> {
    ensure_school_admin(db, user, school_id)
        .await
        .map_err(|e| forbidden_to_not_found(e, resource))
}

fn forbidden_to_not_found(e: AppError, resource: &str) -> AppError {
    if e.status == StatusCode::FORBIDDEN {
        AppError::not_found(anyhow::anyhow!("{resource} not found"))
    } else {
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::session::SessionClaims;
    use axum::http::StatusCode;

    fn user_with_role(role: Option<&str>) -> CurrentUser {
        CurrentUser(SessionClaims {
            sub: Uuid::new_v4().to_string(),
            role: role.map(|r| r.to_string()),
            email: "test@example.com".to_string(),
            account_id: None,
            full_name: "Test User".to_string(),
            school: None,
            must_change_password: false,
            iat: 1_700_000_000,
            exp: 9_999_999_999,
        })
    }

    #[test]
    fn test_require_role_allows_member() {
        let teacher = user_with_role(Some("teacher"));
        assert!(require_role(&teacher, &[UserRole::Admin, UserRole::Teacher]).is_ok());
    }

    #[test]
    fn test_require_role_denies_non_member_with_403() {
        let student = user_with_role(Some("student"));
        let err = require_role(&student, &[UserRole::Admin, UserRole::Teacher]).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_require_role_denies_missing_role() {
        let unassigned = user_with_role(None);
        assert!(require_role(&unassigned, &[UserRole::Admin]).is_err());
    }

    #[test]
    fn test_require_role_denies_unknown_role_string() {
        let odd = user_with_role(Some("janitor"));
        assert!(require_role(&odd, &[UserRole::Admin]).is_err());
    }

    #[test]
    fn test_foreign_tenant_denial_reads_as_not_found() {
        let masked = forbidden_to_not_found(AppError::forbidden(), "Student");
        assert_eq!(masked.status, StatusCode::NOT_FOUND);
        assert_eq!(masked.error.to_string(), "Student not found");
    }

    #[test]
    fn test_non_denial_errors_pass_through_unmasked() {
        let err = forbidden_to_not_found(
            AppError::internal(anyhow::anyhow!("pool timed out")),
            "Student",
        );
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

        let unauthorized = forbidden_to_not_found(AppError::unauthorized(), "Student");
        assert_eq!(unauthorized.status, StatusCode::UNAUTHORIZED);
    }
}
