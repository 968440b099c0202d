use crate::media::Image;
use crate::ui::async_image::intent::{AsyncImageEvent, AsyncImageIntent};
use crate::ui::async_image::state::{AsyncImageState, AsyncImageStatus};
use crate::ui::mvi::Reducer;

/// Once loaded, the image stays loaded for the lifetime of the state.
pub struct AsyncImageReducer;

impl Reducer for AsyncImageReducer {
    type State = AsyncImageState;
    type Event = AsyncImageEvent;

    fn reduce(mut state: Self::State, event: Self::Event) -> Self::State {
        let loading = state.status == AsyncImageStatus::Loading;

        match event {
            AsyncImageEvent::Ui(AsyncImageIntent::OnAppear) => {
                if !state.is_loaded() {
                    state.status = AsyncImageStatus::Loading;
                }
            }
            AsyncImageEvent::Ui(AsyncImageIntent::OnDisappear) => {
                if !state.is_loaded() {
                    state.status = AsyncImageStatus::Idle;
                }
            }
            AsyncImageEvent::Loaded(Some(image)) if loading => {
                state.status = AsyncImageStatus::Loaded(image);
            }
            AsyncImageEvent::Loaded(None) | AsyncImageEvent::FailedToLoad if loading => {
                state.status = AsyncImageStatus::Failed(Image::placeholder());
            }
            AsyncImageEvent::Loaded(_)
            | AsyncImageEvent::FailedToLoad
            | AsyncImageEvent::Persisted => {}
        }
        state
    }
}
