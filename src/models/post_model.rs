use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::post;
use crate::models::{tag_model::TagResponse, user_model::UserResponse};
use crate::utils::validator_utils::trimmed;

/// Body of the new-post and edit-post forms. `tags` repeats once per checked box.
#[derive(Debug, Deserialize, Validate)]
pub struct PostForm {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(length(max = 40, message = "Title must be at most 40 characters"))]
    pub title: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    pub content: String,

    #[serde(default)]
    pub tags: Vec<i32>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i32,
}

impl From<post::Model> for PostResponse {
    fn from(p: post::Model) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            created_at: p.created_at,
            user_id: p.user_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub author: UserResponse,
    pub tags: Vec<TagResponse>,
}

/// Data for the new/edit post form: the author, every tag to choose from and the ones already checked.
#[derive(Debug, Serialize)]
pub struct PostFormResponse {
    pub author: UserResponse,
    pub post: Option<PostResponse>,
    pub tags: Vec<TagResponse>,
    pub selected_tag_ids: Vec<i32>,
}

#[derive(Debug, Serialize)]
pub struct RecentPostResponse {
    pub post: PostResponse,
    pub author: UserResponse,
}
