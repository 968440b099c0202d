use crate::ui::mvi::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoDetailIntent {
    OnAppear,
    TappedFavouriteButton,
    /// Try loading again after a failure.
    Retry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoDetailEvent {
    Ui(PhotoDetailIntent),
    Loaded {
        author: String,
        number_of_comments: usize,
    },
    FailedToLoad,
    Persisted,
}

impl Event for PhotoDetailEvent {}
