//! Tags

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
mod taggable;

pub use errors::TagsServiceError;
pub use repository::{MockTagsRepository, PgTagsRepository, TagsRepository};
pub use service::*;
pub(crate) use taggable::Taggable;
