//! Single-image loader: cache or download, with a sticky loaded state.

mod feedback;
mod intent;
mod reducer;
mod state;
mod view_model;

pub use intent::{AsyncImageEvent, AsyncImageIntent};
pub use reducer::AsyncImageReducer;
pub use state::{AsyncImageState, AsyncImageStatus};
pub use view_model::AsyncImageViewModel;
