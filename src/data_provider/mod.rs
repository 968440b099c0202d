//! Cache-first data sources consumed by the screen feedbacks.
//!
//! Each provider tries the local cache and falls back to the API on any
//! cache failure. A cache miss is never surfaced to the user.

mod async_image;
mod list;
mod photo_detail;

pub use async_image::{AsyncImageDataProvider, ImageDataError};
pub use list::{ListDataError, ListDataProvider, ELEMENTS_KEY};
pub use photo_detail::{
    author_key, number_of_comments_key, PhotoDetailDataProvider, PhotoDetailError,
};
