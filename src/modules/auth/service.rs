use chrono::{Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::credentials::CredentialsConfig;
use crate::utils::email::EmailService;
use crate::utils::errors::AppError;
use crate::utils::password::{hash_password, verify_credential};
use crate::utils::session::UserProfile;

const RESET_TOKEN_VALIDITY: Duration = Duration::hours(1);

#[derive(sqlx::FromRow)]
struct UserAuthRow {
    id: Uuid,
    email: String,
    username: Option<String>,
    role: Option<String>,
    full_name: String,
    account_id: Option<String>,
    must_change_password: bool,
    password: Option<String>,
    school: Option<String>,
}

impl UserAuthRow {
    fn into_profile(self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email,
            username: self.username,
            role: self.role,
            full_name: self.full_name,
            account_id: self.account_id,
            school: self.school,
            must_change_password: self.must_change_password,
        }
    }
}

pub struct AuthService;

impl AuthService {
    /// Validate a credential pair and return the user's public profile.
    ///
    /// Sole authority on "are these credentials valid". Read-only: token
    /// issuance and cookie handling belong to the HTTP layer. Unknown
    /// identifier, missing stored credential, and wrong password are
    /// indistinguishable to the caller's client.
    #[instrument(skip(db, password))]
    pub async fn authenticate(
        db: &PgPool,
        columns: &CredentialsConfig,
        identifier: &str,
        password: &str,
    ) -> Result<UserProfile, AppError> {
        let identifier = identifier.trim();

        if identifier.is_empty() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Identifier is required"
            )));
        }
        // Trimmed only for the emptiness check; verification sees the
        // password exactly as supplied.
        if password.trim().is_empty() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Password is required"
            )));
        }

        // Column names are validated identifiers from startup config; the
        // identifier itself is always bound.
        let sql = format!(
            "SELECT u.id, u.email, u.username, u.role, u.full_name, u.account_id,
                    u.must_change_password, u.{password_col} AS password,
                    s.name AS school
             FROM users u
             LEFT JOIN schools s ON s.id = u.school_id
             WHERE u.{email_col} = $1 OR u.{username_col} = $1
             LIMIT 1",
            password_col = columns.password_column,
            email_col = columns.email_column,
            username_col = columns.username_column,
        );

        let row = sqlx::query_as::<_, UserAuthRow>(&sql)
            .bind(identifier)
            .fetch_optional(db)
            .await?;

        let Some(row) = row else {
            return Err(AppError::invalid_credentials());
        };

        let Some(stored) = row.password.as_deref() else {
            return Err(AppError::invalid_credentials());
        };

        if !verify_credential(password, stored)? {
            return Err(AppError::invalid_credentials());
        }

        info!(user.id = %row.id, "Login credentials verified");

        Ok(row.into_profile())
    }

    /// Start the password-reset flow.
    ///
    /// Never reveals whether the address exists: any outcome is Ok and the
    /// controller responds with the same generic message. Only the SHA-256
    /// of the token is stored.
    #[instrument(skip(db, email_service))]
    pub async fn forgot_password(
        db: &PgPool,
        email_service: &EmailService,
        email: &str,
    ) -> Result<(), AppError> {
        #[derive(sqlx::FromRow)]
        struct ResetTarget {
            id: Uuid,
            full_name: String,
        }

        let target = sqlx::query_as::<_, ResetTarget>(
            "SELECT id, full_name FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await?;

        let Some(target) = target else {
            return Ok(());
        };

        let mut token_bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut token_bytes);
        let token = hex::encode(token_bytes);
        let token_hash = hex::encode(Sha256::digest(token.as_bytes()));

        sqlx::query(
            "UPDATE users
             SET reset_token_hash = $1, reset_token_expires_at = $2, updated_at = now()
             WHERE id = $3",
        )
        .bind(&token_hash)
        .bind(Utc::now() + RESET_TOKEN_VALIDITY)
        .bind(target.id)
        .execute(db)
        .await?;

        email_service
            .send_password_reset_email(email, &target.full_name, &token)
            .await?;

        info!(user.id = %target.id, "Password reset token issued");

        Ok(())
    }

    /// Consume a reset token and store a new bcrypt-hashed credential.
    #[instrument(skip(db, token, new_password))]
    pub async fn reset_password(
        db: &PgPool,
        token: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let token_hash = hex::encode(Sha256::digest(token.as_bytes()));

        let user_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM users
             WHERE reset_token_hash = $1 AND reset_token_expires_at > now()",
        )
        .bind(&token_hash)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            AppError::bad_request(anyhow::anyhow!("Invalid or expired reset token"))
        })?;

        let hashed = hash_password(new_password)?;

        sqlx::query(
            "UPDATE users
             SET password = $1, must_change_password = FALSE,
                 reset_token_hash = NULL, reset_token_expires_at = NULL,
                 updated_at = now()
             WHERE id = $2",
        )
        .bind(&hashed)
        .bind(user_id)
        .execute(db)
        .await?;

        info!(user.id = %user_id, "Password reset completed");

        Ok(())
    }

    /// Change the password of an authenticated user and return the
    /// refreshed profile so the caller can re-issue the session cookie
    /// with `must_change_password` cleared.
    #[instrument(skip(db, current_password, new_password))]
    pub async fn change_password(
        db: &PgPool,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<UserProfile, AppError> {
        let row = sqlx::query_as::<_, UserAuthRow>(
            "SELECT u.id, u.email, u.username, u.role, u.full_name, u.account_id,
                    u.must_change_password, u.password, s.name AS school
             FROM users u
             LEFT JOIN schools s ON s.id = u.school_id
             WHERE u.id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(AppError::unauthorized)?;

        let stored = row.password.as_deref().ok_or_else(AppError::unauthorized)?;

        if !verify_credential(current_password, stored)? {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Current password is incorrect"
            )));
        }

        let hashed = hash_password(new_password)?;

        sqlx::query(
            "UPDATE users
             SET password = $1, must_change_password = FALSE, updated_at = now()
             WHERE id = $2",
        )
        .bind(&hashed)
        .bind(user_id)
        .execute(db)
        .await?;

        info!(user.id = %user_id, "Password changed");

        let mut profile = row.into_profile();
        profile.must_change_password = false;
        Ok(profile)
    }
}
