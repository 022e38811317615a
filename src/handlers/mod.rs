pub mod post_handler;
pub mod tag_handler;
pub mod user_handler;

use axum::{extract::State, response::IntoResponse};
use chrono::Utc;

use crate::config::AppState;
use crate::services::blog_service::BlogService;
use crate::utils::{api_response::ResponseBuilder, app_error::AppError};

const RECENT_POSTS: u64 = 5;

pub async fn home_handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let posts = BlogService::recent_posts(&state.db, RECENT_POSTS).await?;
    Ok(ResponseBuilder::success("RECENT_POSTS_FETCHED", "Success", posts))
}

pub async fn health_check_handler(State(state): State<AppState>) -> impl IntoResponse {
    let database = match state.db.ping().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::warn!("Database ping failed: {}", e);
            "down"
        }
    };

    ResponseBuilder::success(
        "HEALTH_CHECK_SUCCESS",
        "Server is healthy",
        serde_json::json!({
            "status": "up",
            "database": database,
            "server_time": Utc::now().to_rfc3339(),
        }),
    )
}
