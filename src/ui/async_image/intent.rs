use crate::media::Image;
use crate::ui::mvi::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncImageIntent {
    OnAppear,
    OnDisappear,
}

#[derive(Debug)]
pub enum AsyncImageEvent {
    Ui(AsyncImageIntent),
    /// `None` when the bytes arrived but did not decode.
    Loaded(Option<Image>),
    FailedToLoad,
    Persisted,
}

impl Event for AsyncImageEvent {}
