use sea_orm::*;

use super::TAG_NAME_MAX;
use crate::entities::{post_tag, tag, tag::Entity as Tag};
use crate::utils::{app_error::AppError, validator_utils::required_text};

pub struct TagRepository;

impl TagRepository {
    pub async fn create(db: &DatabaseConnection, name: &str) -> Result<tag::Model, AppError> {
        let name = required_text("name", name, Some(TAG_NAME_MAX))?;

        let txn = db.begin().await?;
        Self::ensure_name_free(&txn, &name, None).await?;

        let new_tag = tag::ActiveModel {
            id: NotSet,
            name: Set(name.clone()),
        };
        // The unique index still decides if another writer got there first
        let saved = new_tag
            .insert(&txn)
            .await
            .map_err(|e| AppError::from_write(e, "name", &name))?;

        txn.commit().await?;
        tracing::info!(tag_id = saved.id, name = %saved.name, "tag created");
        Ok(saved)
    }

    pub async fn find<C>(db: &C, id: i32) -> Result<tag::Model, AppError>
    where
        C: ConnectionTrait,
    {
        Tag::find_by_id(id)
            .one(db)
            .await?
            .ok_or(AppError::not_found("tag", id))
    }

    /// Tags in creation order.
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<tag::Model>, AppError> {
        Ok(Tag::find().order_by_asc(tag::Column::Id).all(db).await?)
    }

    pub async fn count(db: &DatabaseConnection) -> Result<u64, AppError> {
        Ok(Tag::find().count(db).await?)
    }

    pub async fn update(db: &DatabaseConnection, id: i32, name: &str) -> Result<tag::Model, AppError> {
        let name = required_text("name", name, Some(TAG_NAME_MAX))?;

        let txn = db.begin().await?;
        let mut active: tag::ActiveModel = Self::find(&txn, id).await?.into();
        Self::ensure_name_free(&txn, &name, Some(id)).await?;

        active.name = Set(name.clone());
        let updated = active
            .update(&txn)
            .await
            .map_err(|e| AppError::from_write(e, "name", &name))?;

        txn.commit().await?;
        tracing::info!(tag_id = id, name = %updated.name, "tag updated");
        Ok(updated)
    }

    /// Deletes the tag and its links; the posts themselves stay.
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), AppError> {
        let txn = db.begin().await?;
        Self::find(&txn, id).await?;

        let links = post_tag::Entity::delete_many()
            .filter(post_tag::Column::TagId.eq(id))
            .exec(&txn)
            .await?;
        Tag::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        tracing::info!(tag_id = id, links = links.rows_affected, "tag deleted");
        Ok(())
    }

    async fn ensure_name_free<C>(db: &C, name: &str, except: Option<i32>) -> Result<(), AppError>
    where
        C: ConnectionTrait,
    {
        let mut query = Tag::find().filter(tag::Column::Name.eq(name));
        if let Some(id) = except {
            query = query.filter(tag::Column::Id.ne(id));
        }

        if query.one(db).await?.is_some() {
            return Err(AppError::Conflict {
                field: "name",
                message: format!("'{}' is already taken", name),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{
        post_repository::PostRepository, post_tag_repository::PostTagRepository,
        user_repository::UserRepository,
    };
    use crate::test_support::setup_db;

    #[tokio::test]
    async fn duplicate_name_conflicts_and_leaves_count() {
        let db = setup_db().await;
        TagRepository::create(&db, "test_tag").await.unwrap();
        let before = TagRepository::count(&db).await.unwrap();

        let err = TagRepository::create(&db, "test_tag").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { field: "name", .. }));

        // Surrounding whitespace does not make a new name
        let err = TagRepository::create(&db, "  test_tag ").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));

        assert_eq!(TagRepository::count(&db).await.unwrap(), before);
    }

    #[tokio::test]
    async fn unique_index_violation_maps_to_conflict() {
        let db = setup_db().await;
        TagRepository::create(&db, "rust").await.unwrap();

        // Bypass the pre-check to hit the storage constraint directly
        let err = tag::ActiveModel {
            id: NotSet,
            name: Set("rust".to_string()),
        }
        .insert(&db)
        .await
        .unwrap_err();
        assert!(matches!(AppError::from_write(err, "name", "rust"), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn create_validates_name() {
        let db = setup_db().await;
        assert!(matches!(
            TagRepository::create(&db, "").await.unwrap_err(),
            AppError::Validation { field: "name", title: "is_required", .. }
        ));
        assert!(matches!(
            TagRepository::create(&db, &"n".repeat(TAG_NAME_MAX + 1)).await.unwrap_err(),
            AppError::Validation { title: "too_long", .. }
        ));
        assert_eq!(TagRepository::count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_keeps_creation_order() {
        let db = setup_db().await;
        for name in ["travel", "recipes", "coding"] {
            TagRepository::create(&db, name).await.unwrap();
        }
        let names: Vec<String> = TagRepository::list(&db).await.unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["travel", "recipes", "coding"]);
    }

    #[tokio::test]
    async fn rename_checks_other_tags_only() {
        let db = setup_db().await;
        let travel = TagRepository::create(&db, "travel").await.unwrap();
        TagRepository::create(&db, "coding").await.unwrap();

        // Same name on itself is fine
        let same = TagRepository::update(&db, travel.id, "travel").await.unwrap();
        assert_eq!(same.name, "travel");

        let err = TagRepository::update(&db, travel.id, "coding").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));

        let renamed = TagRepository::update(&db, travel.id, "trips").await.unwrap();
        assert_eq!(TagRepository::find(&db, travel.id).await.unwrap(), renamed);

        let err = TagRepository::update(&db, 999, "nope").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { resource: "tag", .. }));
    }

    #[tokio::test]
    async fn rename_validates_name() {
        let db = setup_db().await;
        let tag = TagRepository::create(&db, "travel").await.unwrap();

        assert!(matches!(
            TagRepository::update(&db, tag.id, "  ").await.unwrap_err(),
            AppError::Validation { field: "name", title: "is_required", .. }
        ));
        assert!(matches!(
            TagRepository::update(&db, tag.id, &"n".repeat(TAG_NAME_MAX + 1)).await.unwrap_err(),
            AppError::Validation { field: "name", title: "too_long", .. }
        ));
        assert_eq!(TagRepository::find(&db, tag.id).await.unwrap().name, "travel");
    }

    #[tokio::test]
    async fn get_missing_tag_is_not_found() {
        let db = setup_db().await;
        let err = TagRepository::find(&db, 5).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { resource: "tag", id: 5 }));
    }

    #[tokio::test]
    async fn delete_missing_tag_is_not_found() {
        let db = setup_db().await;
        let err = TagRepository::delete(&db, 5).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { resource: "tag", id: 5 }));
    }

    #[tokio::test]
    async fn delete_removes_links_but_keeps_posts() {
        let db = setup_db().await;
        let user = UserRepository::create(&db, "Test", "User", None).await.unwrap();
        let post = PostRepository::create(&db, user.id, "Title", "Content", None).await.unwrap();
        let tag = TagRepository::create(&db, "test_tag").await.unwrap();
        let other = TagRepository::create(&db, "other").await.unwrap();
        PostTagRepository::attach(&db, post.id, tag.id).await.unwrap();
        PostTagRepository::attach(&db, post.id, other.id).await.unwrap();

        TagRepository::delete(&db, tag.id).await.unwrap();

        assert!(matches!(
            TagRepository::find(&db, tag.id).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
        assert!(PostRepository::find(&db, post.id).await.is_ok());
        assert_eq!(PostTagRepository::tags_for_post(&db, post.id).await.unwrap(), vec![other]);
    }
}
