//! List screen: photo metadata with favourite ordering, thumbnail
//! pagination and persistence.

mod element;
mod feedback;
mod intent;
mod reducer;
mod state;
mod view_model;

pub use element::{favourite_order, sort_by_favourites, Element, ElementId, Thumbnail};
pub use intent::{ListEvent, ListIntent};
pub use reducer::ListReducer;
pub use state::{ListState, ListStatus, ThumbnailRequest, DEFAULT_THUMBNAIL_WINDOW};
pub use view_model::ListViewModel;
