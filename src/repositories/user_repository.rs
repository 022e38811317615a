use sea_orm::*;

use super::{FIRST_NAME_MAX, LAST_NAME_MAX};
use crate::entities::{post, post_tag, user, user::Entity as User, user::DEFAULT_IMAGE_URL};
use crate::utils::{app_error::AppError, validator_utils::required_text};

pub struct UserRepository;

/// Validated, trimmed user fields ready to be written.
struct UserFields {
    first_name: String,
    last_name: String,
    image_url: String,
}

impl UserFields {
    // A blank or missing image always resolves to the placeholder, never to a previous value.
    fn parse(first_name: &str, last_name: &str, image_url: Option<&str>) -> Result<Self, AppError> {
        let image_url = image_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_IMAGE_URL)
            .to_string();

        Ok(Self {
            first_name: required_text("first_name", first_name, Some(FIRST_NAME_MAX))?,
            last_name: required_text("last_name", last_name, Some(LAST_NAME_MAX))?,
            image_url,
        })
    }
}

impl UserRepository {
    pub async fn create(
        db: &DatabaseConnection,
        first_name: &str,
        last_name: &str,
        image_url: Option<&str>,
    ) -> Result<user::Model, AppError> {
        let fields = UserFields::parse(first_name, last_name, image_url)?;

        let new_user = user::ActiveModel {
            id: NotSet,
            first_name: Set(fields.first_name),
            last_name: Set(fields.last_name),
            image_url: Set(fields.image_url),
        };

        let saved = new_user.insert(db).await?;
        tracing::info!(user_id = saved.id, "user created");
        Ok(saved)
    }

    pub async fn find<C>(db: &C, id: i32) -> Result<user::Model, AppError>
    where
        C: ConnectionTrait,
    {
        User::find_by_id(id)
            .one(db)
            .await?
            .ok_or(AppError::not_found("user", id))
    }

    /// All users by (last_name, first_name), compared byte-wise so case matters.
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<user::Model>, AppError> {
        // Sorted here rather than in SQL: server collations are often case-insensitive.
        let mut users = User::find().all(db).await?;
        users.sort_by(|a, b| {
            (&a.last_name, &a.first_name, a.id).cmp(&(&b.last_name, &b.first_name, b.id))
        });
        Ok(users)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        first_name: &str,
        last_name: &str,
        image_url: Option<&str>,
    ) -> Result<user::Model, AppError> {
        let fields = UserFields::parse(first_name, last_name, image_url)?;

        let txn = db.begin().await?;
        let mut active: user::ActiveModel = Self::find(&txn, id).await?.into();

        active.first_name = Set(fields.first_name);
        active.last_name = Set(fields.last_name);
        active.image_url = Set(fields.image_url);

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(user_id = id, "user updated");
        Ok(updated)
    }

    /// Removes the user, their posts and those posts' tag links as one unit.
    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), AppError> {
        let txn = db.begin().await?;
        let user = Self::find(&txn, id).await?;

        let post_ids: Vec<i32> = post::Entity::find()
            .select_only()
            .column(post::Column::Id)
            .filter(post::Column::UserId.eq(user.id))
            .into_tuple()
            .all(&txn)
            .await?;

        if !post_ids.is_empty() {
            let links = post_tag::Entity::delete_many()
                .filter(post_tag::Column::PostId.is_in(post_ids))
                .exec(&txn)
                .await?;
            let posts = post::Entity::delete_many()
                .filter(post::Column::UserId.eq(user.id))
                .exec(&txn)
                .await?;
            tracing::debug!(
                user_id = id,
                posts = posts.rows_affected,
                links = links.rows_affected,
                "cascaded user delete"
            );
        }

        User::delete_by_id(user.id).exec(&txn).await?;
        txn.commit().await?;

        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{post_repository::PostRepository, post_tag_repository::PostTagRepository};
    use crate::repositories::tag_repository::TagRepository;
    use crate::test_support::setup_db;

    #[tokio::test]
    async fn create_then_get_uses_default_image() {
        let db = setup_db().await;
        let created = UserRepository::create(&db, "Test", "User", None).await.unwrap();

        let fetched = UserRepository::find(&db, created.id).await.unwrap();
        assert_eq!(fetched.first_name, "Test");
        assert_eq!(fetched.last_name, "User");
        assert_eq!(fetched.image_url, DEFAULT_IMAGE_URL);
        assert_eq!(fetched.full_name(), "Test User");
    }

    #[tokio::test]
    async fn blank_image_falls_back_to_default() {
        let db = setup_db().await;
        let created = UserRepository::create(&db, "Han", "Solo", Some("   ")).await.unwrap();
        assert_eq!(created.image_url, DEFAULT_IMAGE_URL);
    }

    #[tokio::test]
    async fn create_rejects_empty_and_overlong_names() {
        let db = setup_db().await;

        let err = UserRepository::create(&db, "", "User", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "first_name", .. }));

        let err = UserRepository::create(&db, "Test", "  ", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "last_name", .. }));

        let long = "x".repeat(FIRST_NAME_MAX + 1);
        let err = UserRepository::create(&db, &long, "User", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { title: "too_long", .. }));

        assert!(UserRepository::list(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_missing_user_is_not_found() {
        let db = setup_db().await;
        let err = UserRepository::find(&db, 42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { resource: "user", id: 42 }));
    }

    #[tokio::test]
    async fn list_is_sorted_by_last_then_first_regardless_of_insert_order() {
        let db = setup_db().await;
        for (first, last) in [("Pat", "Butcher"), ("Han", "Solo"), ("Fio", "Piccolo"), ("Alf", "Solo"), ("Zed", "butcher")] {
            UserRepository::create(&db, first, last, None).await.unwrap();
        }

        let names: Vec<String> = UserRepository::list(&db)
            .await
            .unwrap()
            .iter()
            .map(|u| u.full_name())
            .collect();

        // Uppercase sorts before lowercase
        assert_eq!(
            names,
            vec!["Pat Butcher", "Fio Piccolo", "Alf Solo", "Han Solo", "Zed butcher"]
        );
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_resets_image() {
        let db = setup_db().await;
        let user = UserRepository::create(&db, "Test", "User", Some("https://example.com/a.png"))
            .await
            .unwrap();

        let updated = UserRepository::update(&db, user.id, "EditTest", "User", None).await.unwrap();
        assert_eq!(updated.full_name(), "EditTest User");
        assert_eq!(updated.image_url, DEFAULT_IMAGE_URL);

        let fetched = UserRepository::find(&db, user.id).await.unwrap();
        assert_eq!(fetched.full_name(), "EditTest User");
        assert_eq!(UserRepository::list(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_missing_user_is_not_found() {
        let db = setup_db().await;
        let err = UserRepository::update(&db, 9, "A", "B", None).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_cascades_to_posts_and_links() {
        let db = setup_db().await;
        let user = UserRepository::create(&db, "Test", "User", None).await.unwrap();
        let other = UserRepository::create(&db, "Other", "Person", None).await.unwrap();
        let p1 = PostRepository::create(&db, user.id, "One", "Body", None).await.unwrap();
        let p2 = PostRepository::create(&db, user.id, "Two", "Body", None).await.unwrap();
        let kept = PostRepository::create(&db, other.id, "Kept", "Body", None).await.unwrap();
        let tag = TagRepository::create(&db, "travel").await.unwrap();
        PostTagRepository::attach(&db, p1.id, tag.id).await.unwrap();
        PostTagRepository::attach(&db, kept.id, tag.id).await.unwrap();

        UserRepository::delete(&db, user.id).await.unwrap();

        for id in [p1.id, p2.id] {
            let err = PostRepository::find(&db, id).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound { resource: "post", .. }));
        }
        let remaining = PostTagRepository::posts_for_tag(&db, tag.id).await.unwrap();
        assert_eq!(remaining, vec![kept]);
        assert!(UserRepository::find(&db, other.id).await.is_ok());
        assert_eq!(post_tag::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let db = setup_db().await;
        let err = UserRepository::delete(&db, 3).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
