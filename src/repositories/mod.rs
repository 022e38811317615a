//! Data access layer. Every write runs inside a transaction and every
//! failure comes back as an [`AppError`](crate::utils::app_error::AppError).

pub mod post_repository;
pub mod post_tag_repository;
pub mod tag_repository;
pub mod user_repository;

pub const FIRST_NAME_MAX: usize = 50;
pub const LAST_NAME_MAX: usize = 50;
pub const TITLE_MAX: usize = 40;
pub const TAG_NAME_MAX: usize = 30;
