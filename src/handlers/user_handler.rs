use axum::{extract::State, response::{IntoResponse, Response}};

use crate::config::AppState;
use crate::entities::user::DEFAULT_IMAGE_URL;
use crate::models::user_model::*;
use crate::repositories::user_repository::UserRepository;
use crate::services::blog_service::BlogService;
use crate::utils::{
    api_response::ResponseBuilder, app_error::AppError, id_path::IdPath,
    validated_wrapper::ValidatedForm,
};

pub async fn list_users_handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users: Vec<UserResponse> = UserRepository::list(&state.db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(ResponseBuilder::success("USERS_FETCHED", "Success", users))
}

pub async fn new_user_form_handler() -> impl IntoResponse {
    ResponseBuilder::success(
        "USER_FORM",
        "New user",
        UserFormResponse {
            user: None,
            default_image_url: DEFAULT_IMAGE_URL,
        },
    )
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<UserForm>,
) -> Result<Response, AppError> {
    let user = UserRepository::create(
        &state.db,
        &form.first_name,
        &form.last_name,
        form.image_url.as_deref(),
    )
    .await?;
    Ok(ResponseBuilder::see_other(format!("/users/{}", user.id)))
}

pub async fn show_user_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let detail = BlogService::user_detail(&state.db, id).await?;
    Ok(ResponseBuilder::success("USER_FETCHED", "Success", detail))
}

pub async fn edit_user_form_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let user = UserRepository::find(&state.db, id).await?;
    Ok(ResponseBuilder::success(
        "USER_FORM",
        "Edit user",
        UserFormResponse {
            user: Some(user.into()),
            default_image_url: DEFAULT_IMAGE_URL,
        },
    ))
}

pub async fn update_user_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedForm(form): ValidatedForm<UserForm>,
) -> Result<Response, AppError> {
    UserRepository::update(
        &state.db,
        id,
        &form.first_name,
        &form.last_name,
        form.image_url.as_deref(),
    )
    .await?;
    Ok(ResponseBuilder::see_other(format!("/users/{}", id)))
}

pub async fn delete_user_handler(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Response, AppError> {
    UserRepository::delete(&state.db, id).await?;
    Ok(ResponseBuilder::see_other("/users".to_string()))
}
