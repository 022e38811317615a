pub mod api_response;
pub mod app_error;
pub mod id_path;
pub mod validated_wrapper;
pub mod validator_utils;
