pub mod post_model;
pub mod tag_model;
pub mod user_model;
