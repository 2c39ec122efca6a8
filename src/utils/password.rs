use bcrypt::{DEFAULT_COST, hash, verify};

use crate::utils::errors::AppError;

/// Hash a password for storage. All new and updated credentials go through
/// here; plaintext is never written back.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}

/// Verify a supplied password against a stored credential.
///
/// Bcrypt-shaped values get constant-time bcrypt verification. Anything
/// else is a legacy imported record and falls back to direct equality —
/// a migration shim that disappears as those users rotate their passwords.
pub fn verify_credential(supplied: &str, stored: &str) -> Result<bool, AppError> {
    if is_bcrypt_hash(stored) {
        verify(supplied, stored)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to verify password: {}", e)))
    } else {
        Ok(supplied == stored)
    }
}

fn is_bcrypt_hash(stored: &str) -> bool {
    stored.starts_with("$2a$") || stored.starts_with("$2b$") || stored.starts_with("$2y$")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_bcrypt_credential() {
        let hashed = hash_password("CorrectPass1!").unwrap();

        assert!(verify_credential("CorrectPass1!", &hashed).unwrap());
        assert!(!verify_credential("wrong", &hashed).unwrap());
    }

    #[test]
    fn test_verify_legacy_plaintext_credential() {
        assert!(verify_credential("legacy-pass", "legacy-pass").unwrap());
        assert!(!verify_credential("other", "legacy-pass").unwrap());
    }

    #[test]
    fn test_legacy_value_is_not_treated_as_hash() {
        // A plaintext password that merely mentions bcrypt must not be
        // parsed as one.
        assert!(verify_credential("2a-not-a-hash", "2a-not-a-hash").unwrap());
    }

    #[test]
    fn test_hash_output_is_bcrypt_shaped() {
        let hashed = hash_password("anything").unwrap();
        assert!(is_bcrypt_hash(&hashed));
    }
}
