use std::sync::Arc;

use crate::ui::list::element::{sort_by_favourites, Thumbnail};
use crate::ui::list::intent::{ListEvent, ListIntent};
use crate::ui::list::state::{ListState, ListStatus};
use crate::ui::mvi::Reducer;

pub struct ListReducer;

impl Reducer for ListReducer {
    type State = ListState;
    type Event = ListEvent;

    fn reduce(mut state: Self::State, event: Self::Event) -> Self::State {
        match event {
            ListEvent::LoadedMetadata(mut elements) => {
                if state.status != ListStatus::Loading {
                    return state;
                }
                sort_by_favourites(&mut elements);
                state.elements = Arc::new(elements);
                state.generation += 1;
                state.persisted = false;
                state.status = ListStatus::Loaded;
                state
            }

            ListEvent::FailedToLoadMetadata => {
                if state.status == ListStatus::Loading {
                    state.status = ListStatus::Error;
                }
                state
            }

            ListEvent::Persisted => {
                match state.status {
                    ListStatus::Loaded => {
                        state.persisted = true;
                        state.status = ListStatus::Persisted;
                    }
                    ListStatus::LoadingThumbnails(_) => state.persisted = true,
                    _ => {}
                }
                state
            }

            ListEvent::LoadedThumbnails { images, indexes } => {
                let request = match &state.status {
                    ListStatus::LoadingThumbnails(request) if request.indexes == indexes => {
                        request.clone()
                    }
                    _ => return state,
                };

                for (id, image) in request.ids.into_iter().zip(images) {
                    state.thumbnails.insert(id, Thumbnail::new(id, image));
                }
                state.status = if state.persisted {
                    ListStatus::Persisted
                } else {
                    ListStatus::Loaded
                };
                state
            }

            ListEvent::Ui(ListIntent::CellAppeared(index)) => {
                if !matches!(state.status, ListStatus::Loaded | ListStatus::Persisted) {
                    return state;
                }
                if let Some(request) = state.thumbnail_window_at(index) {
                    state.status = ListStatus::LoadingThumbnails(request);
                }
                state
            }

            ListEvent::Ui(ListIntent::TappedFavourite(id)) => {
                if !state.has_elements() {
                    return state;
                }
                if let Some(position) = state.elements.iter().position(|e| e.id == id) {
                    let elements = Arc::make_mut(&mut state.elements);
                    elements[position].is_favourite = !elements[position].is_favourite;
                    sort_by_favourites(elements);
                }
                state
            }

            ListEvent::Ui(ListIntent::Retry) => {
                if state.status == ListStatus::Error {
                    state.status = ListStatus::Loading;
                }
                state
            }
        }
    }
}
