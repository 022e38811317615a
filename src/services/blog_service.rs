use sea_orm::DatabaseConnection;

use crate::models::{post_model::*, tag_model::*, user_model::*};
use crate::repositories::{
    post_repository::PostRepository, post_tag_repository::PostTagRepository,
    tag_repository::TagRepository, user_repository::UserRepository,
};
use crate::utils::app_error::AppError;

/// Builds the read views that span more than one entity.
pub struct BlogService;

impl BlogService {
    pub async fn recent_posts(db: &DatabaseConnection, limit: u64) -> Result<Vec<RecentPostResponse>, AppError> {
        let posts = PostRepository::recent(db, limit).await?;

        Ok(posts
            .into_iter()
            .map(|(post, author)| RecentPostResponse {
                post: post.into(),
                author: author.into(),
            })
            .collect())
    }

    pub async fn user_detail(db: &DatabaseConnection, user_id: i32) -> Result<UserDetailResponse, AppError> {
        let user = UserRepository::find(db, user_id).await?;
        let posts = PostRepository::list_for_user(db, user_id).await?;

        Ok(UserDetailResponse {
            user: user.into(),
            posts: posts.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn post_detail(db: &DatabaseConnection, post_id: i32) -> Result<PostDetailResponse, AppError> {
        let post = PostRepository::find(db, post_id).await?;
        let author = UserRepository::find(db, post.user_id).await?;
        let tags = PostTagRepository::tags_for_post(db, post_id).await?;

        Ok(PostDetailResponse {
            post: post.into(),
            author: author.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn new_post_form(db: &DatabaseConnection, user_id: i32) -> Result<PostFormResponse, AppError> {
        let author = UserRepository::find(db, user_id).await?;
        let tags = TagRepository::list(db).await?;

        Ok(PostFormResponse {
            author: author.into(),
            post: None,
            tags: tags.into_iter().map(Into::into).collect(),
            selected_tag_ids: Vec::new(),
        })
    }

    pub async fn edit_post_form(db: &DatabaseConnection, post_id: i32) -> Result<PostFormResponse, AppError> {
        let post = PostRepository::find(db, post_id).await?;
        let author = UserRepository::find(db, post.user_id).await?;
        let selected = PostTagRepository::tags_for_post(db, post_id).await?;
        let tags = TagRepository::list(db).await?;

        Ok(PostFormResponse {
            author: author.into(),
            post: Some(post.into()),
            tags: tags.into_iter().map(Into::into).collect(),
            selected_tag_ids: selected.into_iter().map(|t| t.id).collect(),
        })
    }

    pub async fn tag_detail(db: &DatabaseConnection, tag_id: i32) -> Result<TagDetailResponse, AppError> {
        let tag = TagRepository::find(db, tag_id).await?;
        let posts = PostTagRepository::posts_for_tag(db, tag_id).await?;

        Ok(TagDetailResponse {
            tag: tag.into(),
            posts: posts.into_iter().map(Into::into).collect(),
        })
    }
}
