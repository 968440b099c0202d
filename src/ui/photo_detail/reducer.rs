use crate::ui::mvi::Reducer;
use crate::ui::photo_detail::intent::{PhotoDetailEvent, PhotoDetailIntent};
use crate::ui::photo_detail::state::{PhotoDetail, PhotoDetailState, PhotoDetailStatus};

pub struct PhotoDetailReducer;

impl Reducer for PhotoDetailReducer {
    type State = PhotoDetailState;
    type Event = PhotoDetailEvent;

    fn reduce(mut state: Self::State, event: Self::Event) -> Self::State {
        match event {
            PhotoDetailEvent::Ui(PhotoDetailIntent::OnAppear) => {
                // Loaded data is kept; appearing again must not reload it.
                if matches!(
                    state.status,
                    PhotoDetailStatus::Idle | PhotoDetailStatus::NotLoaded
                ) {
                    state.status = PhotoDetailStatus::Loading;
                }
                state
            }

            PhotoDetailEvent::Ui(PhotoDetailIntent::Retry) => {
                if state.status == PhotoDetailStatus::NotLoaded {
                    state.status = PhotoDetailStatus::Loading;
                }
                state
            }

            PhotoDetailEvent::Ui(PhotoDetailIntent::TappedFavouriteButton) => {
                if let Some(detail) = state.detail_mut() {
                    detail.is_favourite = !detail.is_favourite;
                }
                state
            }

            PhotoDetailEvent::Loaded {
                author,
                number_of_comments,
            } => {
                if state.status != PhotoDetailStatus::Loading {
                    return state;
                }
                let element = &state.element;
                state.status = PhotoDetailStatus::Loaded(PhotoDetail {
                    id: element.id,
                    title: element.title.clone(),
                    author,
                    number_of_comments,
                    is_favourite: element.is_favourite,
                    photo_url: element.photo_url.clone(),
                });
                state
            }

            PhotoDetailEvent::FailedToLoad => {
                if state.status == PhotoDetailStatus::Loading {
                    state.status = PhotoDetailStatus::NotLoaded;
                }
                state
            }

            PhotoDetailEvent::Persisted => {
                if let PhotoDetailStatus::Loaded(detail) = state.status {
                    state.status = PhotoDetailStatus::Persisted(detail);
                }
                state
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::list::Element;

    fn element() -> Element {
        Element {
            id: 47,
            title: "et soluta est".to_string(),
            photo_url: "http://img/600/47".to_string(),
            thumbnail_url: "http://img/150/47".to_string(),
            is_favourite: true,
            album_id: 1,
        }
    }

    fn loading() -> PhotoDetailState {
        PhotoDetailReducer::reduce(
            PhotoDetailState::new(element()),
            PhotoDetailEvent::Ui(PhotoDetailIntent::OnAppear),
        )
    }

    fn loaded() -> PhotoDetailState {
        PhotoDetailReducer::reduce(
            loading(),
            PhotoDetailEvent::Loaded {
                author: "Napoleone Bonaparte".to_string(),
                number_of_comments: 11,
            },
        )
    }

    #[test]
    fn appear_starts_loading() {
        assert_eq!(loading().status, PhotoDetailStatus::Loading);
    }

    #[test]
    fn loaded_assembles_detail_from_element() {
        let state = loaded();
        let detail = state.detail().unwrap();

        assert_eq!(detail.id, 47);
        assert_eq!(detail.title, "et soluta est");
        assert_eq!(detail.author, "Napoleone Bonaparte");
        assert_eq!(detail.number_of_comments, 11);
        assert!(detail.is_favourite);
        assert_eq!(detail.photo_url, "http://img/600/47");
    }

    #[test]
    fn appear_when_loaded_does_not_reload() {
        let state = loaded();
        let next = PhotoDetailReducer::reduce(
            state.clone(),
            PhotoDetailEvent::Ui(PhotoDetailIntent::OnAppear),
        );
        assert_eq!(next, state);
    }

    #[test]
    fn failure_moves_to_not_loaded_and_retry_reloads() {
        let state = PhotoDetailReducer::reduce(loading(), PhotoDetailEvent::FailedToLoad);
        assert_eq!(state.status, PhotoDetailStatus::NotLoaded);
        assert!(state.detail().is_err());

        let state =
            PhotoDetailReducer::reduce(state, PhotoDetailEvent::Ui(PhotoDetailIntent::Retry));
        assert_eq!(state.status, PhotoDetailStatus::Loading);
    }

    #[test]
    fn persisted_keeps_the_detail() {
        let state = PhotoDetailReducer::reduce(loaded(), PhotoDetailEvent::Persisted);
        assert!(matches!(state.status, PhotoDetailStatus::Persisted(_)));
        assert_eq!(state.detail().unwrap().author, "Napoleone Bonaparte");
    }

    #[test]
    fn favourite_toggles_once_loaded() {
        let state = PhotoDetailReducer::reduce(
            loaded(),
            PhotoDetailEvent::Ui(PhotoDetailIntent::TappedFavouriteButton),
        );
        assert!(!state.is_favourite());

        let state = PhotoDetailReducer::reduce(state, PhotoDetailEvent::Persisted);
        let state = PhotoDetailReducer::reduce(
            state,
            PhotoDetailEvent::Ui(PhotoDetailIntent::TappedFavouriteButton),
        );
        assert!(state.is_favourite());
        assert!(matches!(state.status, PhotoDetailStatus::Persisted(_)));
    }

    #[test]
    fn favourite_before_load_is_noop() {
        let state = loading();
        let next = PhotoDetailReducer::reduce(
            state.clone(),
            PhotoDetailEvent::Ui(PhotoDetailIntent::TappedFavouriteButton),
        );
        assert_eq!(next, state);
    }

    #[test]
    fn detail_outside_loaded_is_a_status_mismatch() {
        let err = PhotoDetailState::new(element()).detail().unwrap_err();
        assert_eq!(err.expected, "loaded");
        assert_eq!(err.actual, "idle");
    }

    #[test]
    fn unmatched_events_leave_state_unchanged() {
        let idle = PhotoDetailState::new(element());
        let cases = vec![
            (idle.clone(), PhotoDetailEvent::FailedToLoad),
            (idle.clone(), PhotoDetailEvent::Persisted),
            (idle.clone(), PhotoDetailEvent::Ui(PhotoDetailIntent::Retry)),
            (
                idle,
                PhotoDetailEvent::Loaded {
                    author: "x".to_string(),
                    number_of_comments: 1,
                },
            ),
            (loaded(), PhotoDetailEvent::FailedToLoad),
            (
                loaded(),
                PhotoDetailEvent::Loaded {
                    author: "someone else".to_string(),
                    number_of_comments: 99,
                },
            ),
        ];

        for (state, event) in cases {
            let label = format!("{:?} / {:?}", state.status.name(), event);
            assert_eq!(PhotoDetailReducer::reduce(state.clone(), event), state, "{}", label);
        }
    }
}
