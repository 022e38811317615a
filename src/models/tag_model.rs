use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::tag;
use crate::models::post_model::PostResponse;
use crate::utils::validator_utils::trimmed;

#[derive(Debug, Deserialize, Validate)]
pub struct TagForm {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(length(max = 30, message = "Tag name must be at most 30 characters"))]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
}

impl From<tag::Model> for TagResponse {
    fn from(t: tag::Model) -> Self {
        Self { id: t.id, name: t.name }
    }
}

#[derive(Debug, Serialize)]
pub struct TagDetailResponse {
    pub tag: TagResponse,
    pub posts: Vec<PostResponse>,
}

#[derive(Debug, Serialize)]
pub struct TagFormResponse {
    pub tag: Option<TagResponse>,
}
