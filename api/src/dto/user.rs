use serde::{Deserialize, Serialize};
use validator::Validate;

use ms_core::services::ProfileChanges;
use ms_shared::utils::validate_username;

/// Partial profile update; absent fields are left alone
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "validate_username"))]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(request: UpdateProfileRequest) -> Self {
        Self {
            username: request.username,
            email: request.email,
        }
    }
}
