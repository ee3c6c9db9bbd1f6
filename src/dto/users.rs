use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::NewUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 3, max = 72))]
    pub password: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            username: req.username,
            email: req.email,
            password: req.password,
        }
    }
}

/// Sign-up payload; the display name falls back to the username.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 3, max = 72))]
    pub password: String,
    #[validate(length(max = 255))]
    pub name: Option<String>,
}

impl From<RegisterUserRequest> for NewUser {
    fn from(req: RegisterUserRequest) -> Self {
        Self {
            name: req.name.unwrap_or_else(|| req.username.clone()),
            username: req.username,
            email: req.email,
            password: req.password,
        }
    }
}
