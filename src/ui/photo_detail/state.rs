use crate::ui::list::Element;
use crate::ui::mvi::{StatusMismatch, UiState};

/// Everything the detail view shows once both fetches have completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoDetail {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub number_of_comments: usize,
    pub is_favourite: bool,
    pub photo_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoDetailStatus {
    Idle,
    Loading,
    Loaded(PhotoDetail),
    Persisted(PhotoDetail),
    NotLoaded,
}

impl PhotoDetailStatus {
    pub fn name(&self) -> &'static str {
        match self {
            PhotoDetailStatus::Idle => "idle",
            PhotoDetailStatus::Loading => "loading",
            PhotoDetailStatus::Loaded(_) => "loaded",
            PhotoDetailStatus::Persisted(_) => "persisted",
            PhotoDetailStatus::NotLoaded => "not_loaded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoDetailState {
    pub status: PhotoDetailStatus,
    /// The list element this screen was opened for.
    pub element: Element,
}

impl UiState for PhotoDetailState {}

impl PhotoDetailState {
    pub fn new(element: Element) -> Self {
        Self {
            status: PhotoDetailStatus::Idle,
            element,
        }
    }

    /// The assembled detail. Only available once loaded.
    pub fn detail(&self) -> Result<&PhotoDetail, StatusMismatch> {
        match &self.status {
            PhotoDetailStatus::Loaded(detail) | PhotoDetailStatus::Persisted(detail) => Ok(detail),
            other => Err(StatusMismatch {
                expected: "loaded",
                actual: other.name(),
            }),
        }
    }

    pub(crate) fn detail_mut(&mut self) -> Option<&mut PhotoDetail> {
        match &mut self.status {
            PhotoDetailStatus::Loaded(detail) | PhotoDetailStatus::Persisted(detail) => {
                Some(detail)
            }
            _ => None,
        }
    }

    pub fn is_favourite(&self) -> bool {
        self.detail()
            .map(|detail| detail.is_favourite)
            .unwrap_or(self.element.is_favourite)
    }
}
