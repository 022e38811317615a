use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;

/// JSON envelope handed to the view layer.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Serialize)]
pub struct ValidationErrorDetail {
    pub field: String,
    pub title: String,   // i18n key (e.g. "is_required", "too_long")
    pub message: String, // Human readable
}

// Wrapper to combine StatusCode and the Body
pub struct ApiResponseResult<T>(pub StatusCode, pub ApiResponse<T>);

impl<T> IntoResponse for ApiResponseResult<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (self.0, Json(self.1)).into_response()
    }
}

pub struct ResponseBuilder;

impl ResponseBuilder {
    pub fn success<T: Serialize>(code: &'static str, message: &str, data: T) -> ApiResponseResult<T> {
        ApiResponseResult(
            StatusCode::OK,
            ApiResponse {
                status: "success",
                code,
                message: message.to_string(),
                data: Some(data),
            },
        )
    }

    pub fn error(status_code: StatusCode, code: &'static str, message: &str) -> ApiResponseResult<()> {
        ApiResponseResult(
            status_code,
            ApiResponse {
                status: "error",
                code,
                message: message.to_string(),
                data: None,
            },
        )
    }

    pub fn fail_with_data<T: Serialize>(
        status_code: StatusCode,
        code: &'static str,
        message: &str,
        data: T,
    ) -> ApiResponseResult<T> {
        ApiResponseResult(
            status_code,
            ApiResponse {
                status: "error",
                code,
                message: message.to_string(),
                data: Some(data),
            },
        )
    }

    /// 303 to the canonical location of the resource a form just touched.
    pub fn see_other(location: String) -> Response {
        tracing::debug!(%location, "redirecting");
        Redirect::to(&location).into_response()
    }
}
