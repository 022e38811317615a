use axum::{routing::{get, post}, Router};
use crate::config::AppState;
use crate::handlers::post_handler::*;

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(show_post_handler))
        .route("/{id}/edit", get(edit_post_form_handler).post(update_post_handler))
        .route("/{id}/delete", post(delete_post_handler))
}
