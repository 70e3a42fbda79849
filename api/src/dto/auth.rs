use serde::{Deserialize, Serialize};
use validator::Validate;

use ms_core::domain::entities::Role;
use ms_core::services::NewAccount;
use ms_shared::utils::{validate_password, validate_role, validate_username};

fn default_role() -> String {
    Role::User.as_str().to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// 6-20 letters or digits
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    /// 6-30 letters or digits with at least one upper, one lower and one digit
    #[validate(custom(function = "validate_password"))]
    pub password: String,

    /// `User`, `Admin` or `SuperAdmin`
    #[serde(default = "default_role")]
    #[validate(custom(function = "validate_role"))]
    pub role: String,
}

impl RegisterRequest {
    /// Convert into the service input; call only after `validate()` succeeded
    pub fn into_account(self) -> NewAccount {
        NewAccount {
            role: self.role.parse().unwrap_or_default(),
            email: self.email,
            username: self.username,
            password: self.password,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// A missing field is treated like an empty token and reported as `missing`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, username: &str, password: &str, role: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(register("a@x.com", "alice01", "Abc123", "Admin").validate().is_ok());
    }

    #[test]
    fn test_invalid_registration_reports_each_field() {
        let errors = register("not-an-email", "bob", "abcdef", "Root")
            .validate()
            .unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("role"));
    }

    #[test]
    fn test_role_defaults_to_user() {
        let request: RegisterRequest = serde_json::from_str(
            r#"{"email": "a@x.com", "username": "alice01", "password": "Abc123"}"#,
        )
        .unwrap();
        assert_eq!(request.role, "User");
        assert_eq!(request.into_account().role, Role::User);
    }

    #[test]
    fn test_missing_refresh_token_deserializes_empty() {
        let request: RefreshTokenRequest = serde_json::from_str("{}").unwrap();
        assert!(request.refresh_token.is_empty());
    }
}
