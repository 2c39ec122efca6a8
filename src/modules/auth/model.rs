use serde::{Deserialize, Serialize};
use validator::Validate;

/// Roles a user record can carry. The edge gate only cares about `Admin`
/// and `Teacher`; the rest exist for per-resource checks and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Teacher,
    Student,
    Clerk,
    Editor,
    Bursar,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Teacher => "teacher",
            UserRole::Student => "student",
            UserRole::Clerk => "clerk",
            UserRole::Editor => "editor",
            UserRole::Bursar => "bursar",
        }
    }

    /// Parse a stored role string. Unknown values map to `None` rather
    /// than an error; an unrecognized role simply grants nothing.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "teacher" => Some(UserRole::Teacher),
            "student" => Some(UserRole::Student),
            "clerk" => Some(UserRole::Clerk),
            "editor" => Some(UserRole::Editor),
            "bursar" => Some(UserRole::Bursar),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email or username.
    #[validate(length(min = 1, message = "Identifier is required"))]
    pub identifier: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Reset token is required"))]
    pub token: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [
            UserRole::Admin,
            UserRole::Teacher,
            UserRole::Student,
            UserRole::Clerk,
            UserRole::Editor,
            UserRole::Bursar,
        ] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_unknown_role_parses_to_none() {
        assert_eq!(UserRole::parse("superuser"), None);
        assert_eq!(UserRole::parse(""), None);
        assert_eq!(UserRole::parse("Admin"), None);
    }
}
