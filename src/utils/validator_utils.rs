use serde::{Deserialize, Deserializer};
use validator::ValidationError;

use crate::utils::app_error::AppError;

pub fn validate_required(value: &String) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("is_required");
        error.message = Some(std::borrow::Cow::from("This field is required"));
        Err(error)
    } else {
        Ok(())
    }
}

/// serde helper: trims surrounding whitespace from a form field.
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

/// serde helper: trims an optional field, treating blank input as absent.
pub fn trimmed_optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

/// Trims `value` and checks it is non-empty and at most `max` characters.
pub fn required_text(field: &'static str, value: &str, max: Option<usize>) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::required(field));
    }
    if let Some(max) = max {
        if value.chars().count() > max {
            return Err(AppError::too_long(field, max));
        }
    }
    Ok(value.to_string())
}
