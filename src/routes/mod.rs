use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::config::AppState;
use crate::handlers::{health_check_handler, home_handler};

pub mod post_route;
pub mod tag_route;
pub mod user_route;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .nest("/users", user_route::user_routes())
        .nest("/posts", post_route::post_routes())
        .nest("/tags", tag_route::tag_routes())
        .route("/health", get(health_check_handler))
        .layer(TraceLayer::new_for_http())
}
