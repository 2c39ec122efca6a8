use sqlx::PgPool;

use crate::utils::password::hash_password;

/// Insert a global admin account. Used by the `create-admin` subcommand to
/// bootstrap a fresh deployment before any user can log in.
pub async fn create_admin_user(
    db: &PgPool,
    full_name: &str,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let hashed_password = hash_password(password)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let result = sqlx::query(
        "INSERT INTO users (full_name, email, password, role, school_id)
         VALUES ($1, $2, $3, 'admin', NULL)
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(full_name)
    .bind(email)
    .bind(hashed_password)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err("User with this email already exists".into());
    }

    Ok(())
}
