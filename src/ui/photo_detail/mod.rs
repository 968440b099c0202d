//! Photo detail screen: author and comment count for one element, with a
//! favourite toggle and background persistence.

mod feedback;
mod intent;
mod reducer;
mod state;
mod view_model;

pub use intent::{PhotoDetailEvent, PhotoDetailIntent};
pub use reducer::PhotoDetailReducer;
pub use state::{PhotoDetail, PhotoDetailState, PhotoDetailStatus};
pub use view_model::PhotoDetailViewModel;
