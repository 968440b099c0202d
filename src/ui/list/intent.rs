use crate::media::Image;
use crate::ui::list::element::{Element, ElementId};
use crate::ui::mvi::Event;

/// User intents sent by the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListIntent {
    /// A cell at this index became visible.
    CellAppeared(usize),
    TappedFavourite(ElementId),
    /// Try loading again after an error.
    Retry,
}

#[derive(Debug, Clone)]
pub enum ListEvent {
    Ui(ListIntent),
    LoadedMetadata(Vec<Element>),
    FailedToLoadMetadata,
    /// Results aligned with `indexes`; `None` marks a failed thumbnail.
    LoadedThumbnails {
        images: Vec<Option<Image>>,
        indexes: Vec<usize>,
    },
    Persisted,
}

impl Event for ListEvent {}
