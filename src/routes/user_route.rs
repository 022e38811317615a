use axum::{routing::{get, post}, Router};
use crate::config::AppState;
use crate::handlers::{post_handler::*, user_handler::*};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users_handler))
        .route("/new", get(new_user_form_handler).post(create_user_handler))
        .route("/{id}", get(show_user_handler))
        .route("/{id}/edit", get(edit_user_form_handler).post(update_user_handler))
        .route("/{id}/delete", post(delete_user_handler))
        .route("/{id}/posts/new", get(new_post_form_handler).post(create_post_handler))
}
