use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::config::AppState;

/// Fresh in-memory SQLite with every migration applied.
pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    Migrator::up(&db, None).await.expect("migrations");
    db
}

pub async fn setup_state() -> AppState {
    AppState { db: setup_db().await }
}
