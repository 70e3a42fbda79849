//! Field validators plugged into `validator` derives via `custom(function = ...)`

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use validator::ValidationError;

/// Roles accepted at registration
pub const ROLES: [&str; 3] = ["User", "Admin", "SuperAdmin"];

static USERNAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9]{6,20}$").unwrap_or_else(|e| panic!("invalid username pattern: {e}"))
});

static PASSWORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9]{6,30}$").unwrap_or_else(|e| panic!("invalid password pattern: {e}"))
});

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// 6-20 ASCII letters or digits
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err(error(
            "username",
            "username must be 6-20 letters or digits",
        ))
    }
}

/// 6-30 letters or digits with at least one uppercase, one lowercase and one digit
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let complex = password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit());

    if PASSWORD_RE.is_match(password) && complex {
        Ok(())
    } else {
        Err(error(
            "password",
            "password must be 6-30 letters or digits with upper, lower and digit",
        ))
    }
}

pub fn validate_role(role: &str) -> Result<(), ValidationError> {
    if ROLES.contains(&role) {
        Ok(())
    } else {
        Err(error("role", "role must be one of User, Admin, SuperAdmin"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice01").is_ok());
        assert!(validate_username("abc").is_err());
        assert!(validate_username("has space1").is_err());
        assert!(validate_username(&"a".repeat(21)).is_err());
    }

    #[test]
    fn test_password_requires_mixed_classes() {
        assert!(validate_password("Abc123").is_ok());
        assert!(validate_password("abc123").is_err());
        assert!(validate_password("ABC123").is_err());
        assert!(validate_password("Abcdef").is_err());
        assert!(validate_password("Ab1!xyz").is_err());
        assert!(validate_password("Ab1").is_err());
    }

    #[test]
    fn test_role_whitelist() {
        for role in ROLES {
            assert!(validate_role(role).is_ok());
        }
        assert!(validate_role("admin").is_err());
        assert!(validate_role("Root").is_err());
    }

    #[test]
    fn test_error_carries_message() {
        let err = validate_role("Guest").unwrap_err();
        assert_eq!(err.code, "role");
        assert!(err.message.is_some());
    }
}
