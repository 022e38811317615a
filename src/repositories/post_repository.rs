use chrono::Utc;
use sea_orm::*;

use super::{post_tag_repository::PostTagRepository, user_repository::UserRepository, TITLE_MAX};
use crate::entities::{post, post::Entity as Post, post_tag, user};
use crate::utils::{app_error::AppError, validator_utils::required_text};

pub struct PostRepository;

fn parse_fields(title: &str, content: &str) -> Result<(String, String), AppError> {
    Ok((
        required_text("title", title, Some(TITLE_MAX))?,
        required_text("content", content, None)?,
    ))
}

impl PostRepository {
    /// Creates a post owned by `user_id`. When `tag_ids` is given the post starts with exactly those tags.
    pub async fn create(
        db: &DatabaseConnection,
        user_id: i32,
        title: &str,
        content: &str,
        tag_ids: Option<&[i32]>,
    ) -> Result<post::Model, AppError> {
        let (title, content) = parse_fields(title, content)?;

        let txn = db.begin().await?;
        UserRepository::find(&txn, user_id).await?;

        let new_post = post::ActiveModel {
            id: NotSet,
            title: Set(title),
            content: Set(content),
            created_at: Set(Utc::now()),
            user_id: Set(user_id),
        };
        let saved = new_post.insert(&txn).await?;

        if let Some(tag_ids) = tag_ids {
            PostTagRepository::replace_in(&txn, saved.id, tag_ids).await?;
        }

        txn.commit().await?;
        tracing::info!(post_id = saved.id, user_id, "post created");
        Ok(saved)
    }

    pub async fn find<C>(db: &C, id: i32) -> Result<post::Model, AppError>
    where
        C: ConnectionTrait,
    {
        Post::find_by_id(id)
            .one(db)
            .await?
            .ok_or(AppError::not_found("post", id))
    }

    /// The owner's posts, newest first.
    pub async fn list_for_user(db: &DatabaseConnection, user_id: i32) -> Result<Vec<post::Model>, AppError> {
        UserRepository::find(db, user_id).await?;

        Ok(Post::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(db)
            .await?)
    }

    /// Newest posts across every user, each loaded with its author in the same query.
    pub async fn recent(
        db: &DatabaseConnection,
        limit: u64,
    ) -> Result<Vec<(post::Model, user::Model)>, AppError> {
        let rows = Post::find()
            .find_also_related(user::Entity)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .limit(limit)
            .all(db)
            .await?;

        rows.into_iter()
            .map(|(post, author)| match author {
                Some(author) => Ok((post, author)),
                None => Err(AppError::not_found("user", post.user_id)),
            })
            .collect()
    }

    /// Overwrites title and content. `tag_ids` of `Some` replaces the tag set, `None` leaves it alone.
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        title: &str,
        content: &str,
        tag_ids: Option<&[i32]>,
    ) -> Result<post::Model, AppError> {
        let (title, content) = parse_fields(title, content)?;

        let txn = db.begin().await?;
        let mut active: post::ActiveModel = Self::find(&txn, id).await?.into();
        active.title = Set(title);
        active.content = Set(content);
        let updated = active.update(&txn).await?;

        if let Some(tag_ids) = tag_ids {
            PostTagRepository::replace_in(&txn, id, tag_ids).await?;
        }

        txn.commit().await?;
        tracing::info!(post_id = id, "post updated");
        Ok(updated)
    }

    /// Deletes the post and its tag links, returning the removed row.
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<post::Model, AppError> {
        let txn = db.begin().await?;
        let post = Self::find(&txn, id).await?;

        let links = post_tag::Entity::delete_many()
            .filter(post_tag::Column::PostId.eq(id))
            .exec(&txn)
            .await?;
        Post::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        tracing::info!(post_id = id, links = links.rows_affected, "post deleted");
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::tag_repository::TagRepository;
    use crate::test_support::setup_db;

    #[tokio::test]
    async fn create_requires_existing_owner() {
        let db = setup_db().await;
        let err = PostRepository::create(&db, 99, "Title", "Content", None).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { resource: "user", id: 99 }));
        assert_eq!(Post::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn create_validates_title_and_content() {
        let db = setup_db().await;
        let user = UserRepository::create(&db, "Test", "User", None).await.unwrap();

        let err = PostRepository::create(&db, user.id, " ", "Content", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "title", .. }));

        let err = PostRepository::create(&db, user.id, "Title", "", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "content", .. }));

        let long = "t".repeat(TITLE_MAX + 1);
        let err = PostRepository::create(&db, user.id, &long, "Content", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { title: "too_long", .. }));
    }

    #[tokio::test]
    async fn create_sets_timestamp_and_tags() {
        let db = setup_db().await;
        let user = UserRepository::create(&db, "Test", "User", None).await.unwrap();
        let tag = TagRepository::create(&db, "test_tag").await.unwrap();

        let before = Utc::now();
        let post = PostRepository::create(&db, user.id, "Test Title", "Test Content", Some(&[tag.id][..]))
            .await
            .unwrap();

        assert!(post.created_at >= before - chrono::Duration::seconds(1));
        assert_eq!(post.user_id, user.id);
        assert_eq!(PostTagRepository::tags_for_post(&db, post.id).await.unwrap(), vec![tag]);
    }

    #[tokio::test]
    async fn create_with_unknown_tag_rolls_back() {
        let db = setup_db().await;
        let user = UserRepository::create(&db, "Test", "User", None).await.unwrap();

        let err = PostRepository::create(&db, user.id, "Title", "Content", Some(&[404][..]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { resource: "tag", id: 404 }));
        assert_eq!(Post::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_overwrites_and_optionally_retags() {
        let db = setup_db().await;
        let user = UserRepository::create(&db, "Test", "User", None).await.unwrap();
        let a = TagRepository::create(&db, "a").await.unwrap();
        let b = TagRepository::create(&db, "b").await.unwrap();
        let post = PostRepository::create(&db, user.id, "Old", "Old body", Some(&[a.id][..]))
            .await
            .unwrap();

        let updated = PostRepository::update(&db, post.id, "New and Improved Title", "New body", None)
            .await
            .unwrap();
        assert_eq!(updated.title, "New and Improved Title");
        assert_eq!(updated.created_at, post.created_at);
        assert_eq!(PostTagRepository::tags_for_post(&db, post.id).await.unwrap(), vec![a.clone()]);

        PostRepository::update(&db, post.id, "Again", "Body", Some(&[b.id][..])).await.unwrap();
        assert_eq!(PostTagRepository::tags_for_post(&db, post.id).await.unwrap(), vec![b]);
    }

    #[tokio::test]
    async fn update_missing_post_is_not_found() {
        let db = setup_db().await;
        let err = PostRepository::update(&db, 5, "Title", "Content", None).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { resource: "post", id: 5 }));
    }

    #[tokio::test]
    async fn update_validates_before_writing() {
        let db = setup_db().await;
        let user = UserRepository::create(&db, "Test", "User", None).await.unwrap();
        let post = PostRepository::create(&db, user.id, "Title", "Content", None).await.unwrap();

        let err = PostRepository::update(&db, post.id, "", "Content", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "title", .. }));
        assert_eq!(PostRepository::find(&db, post.id).await.unwrap().title, "Title");
    }

    #[tokio::test]
    async fn delete_removes_links_but_not_owner_or_tag() {
        let db = setup_db().await;
        let user = UserRepository::create(&db, "Test", "User", None).await.unwrap();
        let tag = TagRepository::create(&db, "test_tag").await.unwrap();
        let post = PostRepository::create(&db, user.id, "Test Title", "Test Content", Some(&[tag.id][..]))
            .await
            .unwrap();
        let sibling = PostRepository::create(&db, user.id, "Sibling", "Content", None).await.unwrap();

        let removed = PostRepository::delete(&db, post.id).await.unwrap();
        assert_eq!(removed.user_id, user.id);

        assert!(matches!(
            PostRepository::find(&db, post.id).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
        assert!(UserRepository::find(&db, user.id).await.is_ok());
        assert!(PostRepository::find(&db, sibling.id).await.is_ok());
        assert!(TagRepository::find(&db, tag.id).await.is_ok());
        assert!(PostTagRepository::posts_for_tag(&db, tag.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_for_user_is_newest_first() {
        let db = setup_db().await;
        let user = UserRepository::create(&db, "Test", "User", None).await.unwrap();
        let first = PostRepository::create(&db, user.id, "First", "Body", None).await.unwrap();
        let second = PostRepository::create(&db, user.id, "Second", "Body", None).await.unwrap();

        let ids: Vec<i32> = PostRepository::list_for_user(&db, user.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);

        let recent = PostRepository::recent(&db, 1).await.unwrap();
        assert_eq!(recent.len(), 1);
        let (latest, author) = &recent[0];
        assert_eq!(latest.id, second.id);
        assert_eq!(author.id, user.id);
    }
}
