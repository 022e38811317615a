use sea_orm::{sea_query::OnConflict, *};

use super::{post_repository::PostRepository, tag_repository::TagRepository};
use crate::entities::{post, post_tag, tag};
use crate::utils::app_error::AppError;

/// Reads and writes the post <-> tag join table.
pub struct PostTagRepository;

impl PostTagRepository {
    /// Links a tag to a post. Attaching an existing link is a no-op.
    pub async fn attach(db: &DatabaseConnection, post_id: i32, tag_id: i32) -> Result<(), AppError> {
        let txn = db.begin().await?;
        PostRepository::find(&txn, post_id).await?;
        TagRepository::find(&txn, tag_id).await?;

        let link = post_tag::ActiveModel {
            post_id: Set(post_id),
            tag_id: Set(tag_id),
        };
        let inserted = post_tag::Entity::insert(link)
            .on_conflict(
                OnConflict::columns([post_tag::Column::PostId, post_tag::Column::TagId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;

        if inserted > 0 {
            tracing::info!(post_id, tag_id, "tag attached");
        }

        txn.commit().await?;
        Ok(())
    }

    /// Replaces the post's tag set with exactly `tag_ids`, leaving title and content alone.
    ///
    /// Entry point for callers that retag without going through the post forms;
    /// the forms retag inside `PostRepository::{create, update}` via [`Self::replace_in`].
    pub async fn set_for_post(db: &DatabaseConnection, post_id: i32, tag_ids: &[i32]) -> Result<(), AppError> {
        let txn = db.begin().await?;
        PostRepository::find(&txn, post_id).await?;
        Self::replace_in(&txn, post_id, tag_ids).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Swaps the links of `post_id` for `tag_ids` on a caller-owned transaction.
    /// Fails before touching anything if a tag id is unknown.
    pub(crate) async fn replace_in<C>(conn: &C, post_id: i32, tag_ids: &[i32]) -> Result<(), AppError>
    where
        C: ConnectionTrait,
    {
        let mut wanted = tag_ids.to_vec();
        wanted.sort_unstable();
        wanted.dedup();

        for &tag_id in &wanted {
            TagRepository::find(conn, tag_id).await?;
        }

        post_tag::Entity::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(conn)
            .await?;

        if !wanted.is_empty() {
            let links = wanted.iter().map(|&tag_id| post_tag::ActiveModel {
                post_id: Set(post_id),
                tag_id: Set(tag_id),
            });
            post_tag::Entity::insert_many(links).exec_without_returning(conn).await?;
        }

        tracing::debug!(post_id, tags = ?wanted, "post tags replaced");
        Ok(())
    }

    pub async fn tags_for_post(db: &DatabaseConnection, post_id: i32) -> Result<Vec<tag::Model>, AppError> {
        let post = PostRepository::find(db, post_id).await?;
        Ok(post
            .find_related(tag::Entity)
            .order_by_asc(tag::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn posts_for_tag(db: &DatabaseConnection, tag_id: i32) -> Result<Vec<post::Model>, AppError> {
        let tag = TagRepository::find(db, tag_id).await?;
        Ok(tag
            .find_related(post::Entity)
            .order_by_asc(post::Column::Id)
            .all(db)
            .await?)
    }
}
