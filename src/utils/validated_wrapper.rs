use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::Form;
use validator::{Validate, ValidationErrors};
use crate::utils::api_response::{ResponseBuilder, ValidationErrorDetail};

/// Urlencoded form body that has already passed `Validate`.
///
/// Uses `axum_extra`'s `Form` so repeated keys (`tags=1&tags=2`) land in a `Vec`.
pub struct ValidatedForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: serde::de::DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = axum::response::Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // 1. Form Extraction
        let Form(payload) = Form::<T>::from_request(req, state)
            .await
            .map_err(|err| {
                let message = format!("Invalid form body: {}", err);
                ResponseBuilder::error(StatusCode::BAD_REQUEST, "INVALID_FORM", &message).into_response()
            })?;

        // 2. Field Validation
        if let Err(e) = payload.validate() {
            let error_list = map_validation_errors(e);

            return Err(ResponseBuilder::fail_with_data(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Validation failed",
                error_list,
            )
            .into_response());
        }

        Ok(ValidatedForm(payload))
    }
}

// Convert validator errors to our custom struct list, sorted so output is stable
fn map_validation_errors(errors: ValidationErrors) -> Vec<ValidationErrorDetail> {
    let mut details = Vec::new();

    for (field, error_kind) in errors.field_errors() {
        for err in error_kind {
            details.push(ValidationErrorDetail {
                field: field.to_string(),
                title: err.code.to_string(),
                message: err
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string()),
            });
        }
    }

    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}
