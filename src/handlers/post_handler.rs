use axum::{extract::State, response::{IntoResponse, Response}};

use crate::config::AppState;
use crate::models::post_model::PostForm;
use crate::repositories::post_repository::PostRepository;
use crate::services::blog_service::BlogService;
use crate::utils::{
    api_response::ResponseBuilder, app_error::AppError, id_path::IdPath,
    validated_wrapper::ValidatedForm,
};

pub async fn new_post_form_handler(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let form = BlogService::new_post_form(&state.db, user_id).await?;
    Ok(ResponseBuilder::success("POST_FORM", "New post", form))
}

pub async fn create_post_handler(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
    ValidatedForm(form): ValidatedForm<PostForm>,
) -> Result<Response, AppError> {
    PostRepository::create(&state.db, user_id, &form.title, &form.content, Some(form.tags.as_slice())).await?;
    Ok(ResponseBuilder::see_other(format!("/users/{}", user_id)))
}

pub async fn show_post_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let detail = BlogService::post_detail(&state.db, id).await?;
    Ok(ResponseBuilder::success("POST_FETCHED", "Success", detail))
}

pub async fn edit_post_form_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let form = BlogService::edit_post_form(&state.db, id).await?;
    Ok(ResponseBuilder::success("POST_FORM", "Edit post", form))
}

pub async fn update_post_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedForm(form): ValidatedForm<PostForm>,
) -> Result<Response, AppError> {
    // The edit form posts every checked tag, so an empty list clears them
    PostRepository::update(&state.db, id, &form.title, &form.content, Some(form.tags.as_slice())).await?;
    Ok(ResponseBuilder::see_other(format!("/posts/{}", id)))
}

pub async fn delete_post_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Response, AppError> {
    let removed = PostRepository::delete(&state.db, id).await?;
    Ok(ResponseBuilder::see_other(format!("/users/{}", removed.user_id)))
}
