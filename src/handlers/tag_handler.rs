use axum::{extract::State, response::{IntoResponse, Response}};

use crate::config::AppState;
use crate::models::tag_model::*;
use crate::repositories::tag_repository::TagRepository;
use crate::services::blog_service::BlogService;
use crate::utils::{
    api_response::ResponseBuilder, app_error::AppError, id_path::IdPath,
    validated_wrapper::ValidatedForm,
};

pub async fn list_tags_handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let tags: Vec<TagResponse> = TagRepository::list(&state.db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(ResponseBuilder::success("TAGS_FETCHED", "Success", tags))
}

pub async fn new_tag_form_handler() -> impl IntoResponse {
    ResponseBuilder::success("TAG_FORM", "New tag", TagFormResponse { tag: None })
}

pub async fn create_tag_handler(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<TagForm>,
) -> Result<Response, AppError> {
    TagRepository::create(&state.db, &form.name).await?;
    Ok(ResponseBuilder::see_other("/tags".to_string()))
}

pub async fn show_tag_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let detail = BlogService::tag_detail(&state.db, id).await?;
    Ok(ResponseBuilder::success("TAG_FETCHED", "Success", detail))
}

pub async fn edit_tag_form_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let tag = TagRepository::find(&state.db, id).await?;
    Ok(ResponseBuilder::success(
        "TAG_FORM",
        "Edit tag",
        TagFormResponse { tag: Some(tag.into()) },
    ))
}

pub async fn update_tag_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedForm(form): ValidatedForm<TagForm>,
) -> Result<Response, AppError> {
    TagRepository::update(&state.db, id, &form.name).await?;
    Ok(ResponseBuilder::see_other("/tags".to_string()))
}

pub async fn delete_tag_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Response, AppError> {
    TagRepository::delete(&state.db, id).await?;
    Ok(ResponseBuilder::see_other("/tags".to_string()))
}
