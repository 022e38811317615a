use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::user;
use crate::models::post_model::PostResponse;
use crate::utils::validator_utils::{trimmed, trimmed_optional};

/// Body of the new-user and edit-user forms. Accepts `first_name` or `first-name` style keys.
#[derive(Debug, Deserialize, Validate)]
pub struct UserForm {
    #[serde(default, alias = "first-name", deserialize_with = "trimmed")]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(length(max = 50, message = "First name must be at most 50 characters"))]
    pub first_name: String,

    #[serde(default, alias = "last-name", deserialize_with = "trimmed")]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(length(max = 50, message = "Last name must be at most 50 characters"))]
    pub last_name: String,

    #[serde(default, alias = "image-url", deserialize_with = "trimmed_optional")]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub image_url: String,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            full_name: u.full_name(),
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            image_url: u.image_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserDetailResponse {
    pub user: UserResponse,
    pub posts: Vec<PostResponse>,
}

/// Data for the new/edit user form. `user` is empty on the new form.
#[derive(Debug, Serialize)]
pub struct UserFormResponse {
    pub user: Option<UserResponse>,
    pub default_image_url: &'static str,
}
