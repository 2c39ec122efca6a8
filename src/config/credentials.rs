use std::env;

/// Column names used by the login lookup.
///
/// Legacy deployments renamed the credential columns; the overrides keep
/// the issuer working against those schemas. Values are validated as plain
/// SQL identifiers at startup because they are interpolated into the lookup
/// statement — bad configuration aborts the process, it never reaches a
/// query.
#[derive(Clone, Debug)]
pub struct CredentialsConfig {
    pub email_column: String,
    pub username_column: String,
    pub password_column: String,
}

impl CredentialsConfig {
    pub fn from_env() -> Self {
        let config = Self {
            email_column: env::var("LOGIN_EMAIL_COLUMN").unwrap_or_else(|_| "email".to_string()),
            username_column: env::var("LOGIN_USERNAME_COLUMN")
                .unwrap_or_else(|_| "username".to_string()),
            password_column: env::var("LOGIN_PASSWORD_COLUMN")
                .unwrap_or_else(|_| "password".to_string()),
        };

        for column in [
            &config.email_column,
            &config.username_column,
            &config.password_column,
        ] {
            assert!(
                is_sql_identifier(column),
                "Invalid login column override: {column:?}"
            );
        }

        config
    }
}

fn is_sql_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_validation() {
        assert!(is_sql_identifier("email"));
        assert!(is_sql_identifier("user_name"));
        assert!(is_sql_identifier("_hidden"));
        assert!(!is_sql_identifier(""));
        assert!(!is_sql_identifier("1column"));
        assert!(!is_sql_identifier("email; DROP TABLE users"));
        assert!(!is_sql_identifier("email\""));
    }
}
