//! Status codes carried in the `status_code` field of every response envelope

/// Codes shared by all three services
pub mod error_codes {
    pub const SUCCESS: &str = "0000";
    pub const BAD_REQUEST: &str = "4000";
    pub const INVALID_PARAMETERS: &str = "4001";
    pub const EMAIL_EXISTS: &str = "4002";
    pub const UNAUTHORIZED: &str = "4010";
    pub const NOT_FOUND: &str = "4040";
    pub const INTERNAL_ERROR: &str = "5000";
    pub const SERVICE_UNAVAILABLE: &str = "5030";
}

/// Default `msg` for a status code
pub fn default_message(code: &str) -> &'static str {
    match code {
        error_codes::SUCCESS => "Success",
        error_codes::BAD_REQUEST => "Bad Request",
        error_codes::INVALID_PARAMETERS => "Invalid parameters",
        error_codes::EMAIL_EXISTS => "Email already exists",
        error_codes::UNAUTHORIZED => "Unauthorized",
        error_codes::NOT_FOUND => "Not Found",
        error_codes::SERVICE_UNAVAILABLE => "Service unavailable",
        _ => "Internal server error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_messages() {
        assert_eq!(default_message(error_codes::SUCCESS), "Success");
        assert_eq!(default_message(error_codes::UNAUTHORIZED), "Unauthorized");
        assert_eq!(default_message("9999"), "Internal server error");
    }
}
