use axum::{
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};

use crate::utils::api_response::ResponseBuilder;

/// Integer `{id}` path segment. Anything that is not an id is a missing resource, not a bad request.
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        raw.parse::<i32>().map(IdPath).map_err(|_| {
            ResponseBuilder::error(StatusCode::NOT_FOUND, "NOT_FOUND", &format!("Nothing found at '{}'", raw))
                .into_response()
        })
    }
}
