use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::entities::user;
use crate::repositories::{
    post_repository::PostRepository, post_tag_repository::PostTagRepository,
    tag_repository::TagRepository, user_repository::UserRepository,
};
use crate::utils::app_error::AppError;

const USERS: [(&str, &str, &str); 3] = [
    ("Han", "Solo", "https://tse1.mm.bing.net/th?id=OIP.cl5ZfOGYi6ZBgT5f-dQK6gHaIp&pid=Api"),
    ("Pat", "Butcher", "https://static.wikia.nocookie.net/ghosts-bbc-2019/images/8/8e/Pat.jpg/revision/latest/scale-to-width-down/350?cb=20190527100310"),
    ("Fio", "Piccolo", "https://image.tmdb.org/t/p/original/nAeCzilMRXvGaxiCpv63ZRVRVgh.jpg"),
];

// Tag name -> indexes of the seeded posts it is attached to
const TAGS: [(&str, &[usize]); 3] = [
    ("travel", &[0, 2]),
    ("recipes", &[1]),
    ("coding", &[1, 2]),
];

/// Fills an empty database with sample users, one post each and a few tags.
/// Does nothing once any user exists.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), AppError> {
    if user::Entity::find().count(db).await? > 0 {
        tracing::info!("Users already present, skipping demo seed");
        return Ok(());
    }

    let mut post_ids = Vec::with_capacity(USERS.len());
    for (n, (first, last, image)) in USERS.iter().enumerate() {
        let user = UserRepository::create(db, first, last, Some(*image)).await?;
        let title = format!("Post {}", n + 1);
        let content = format!("This is just some dummy content for {}.  Great stuff.", title);
        let post = PostRepository::create(db, user.id, &title, &content, None).await?;
        post_ids.push(post.id);
    }

    for (name, posts) in TAGS {
        let tag = TagRepository::create(db, name).await?;
        for &idx in posts {
            PostTagRepository::attach(db, post_ids[idx], tag.id).await?;
        }
    }

    let tags = TagRepository::count(db).await?;
    tracing::info!(users = USERS.len(), tags, "Seeded demo data");
    Ok(())
}
