use std::collections::HashMap;
use std::sync::Arc;

use crate::ui::list::element::{Element, ElementId, Thumbnail};
use crate::ui::mvi::{StatusMismatch, UiState};

/// Default number of thumbnails requested when a cell appears.
pub const DEFAULT_THUMBNAIL_WINDOW: usize = 9;

/// Thumbnails being fetched, addressed by list index.
///
/// `ids` pins each index to the element it pointed at when the request was
/// made, so a re-sort while loading cannot misplace results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailRequest {
    pub indexes: Vec<usize>,
    pub ids: Vec<ElementId>,
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    Loading,
    Loaded,
    LoadingThumbnails(ThumbnailRequest),
    Persisted,
    Error,
}

impl ListStatus {
    pub fn name(&self) -> &'static str {
        match self {
            ListStatus::Loading => "loading",
            ListStatus::Loaded => "loaded",
            ListStatus::LoadingThumbnails(_) => "loading_thumbnails",
            ListStatus::Persisted => "persisted",
            ListStatus::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    pub status: ListStatus,
    /// Shared so effects can take a snapshot without copying the collection.
    pub elements: Arc<Vec<Element>>,
    pub thumbnails: HashMap<ElementId, Thumbnail>,
    pub thumbnail_window: usize,
    /// Bumped every time a new element collection is loaded.
    pub generation: u64,
    /// The current collection has reached the cache.
    pub persisted: bool,
}

impl UiState for ListState {}

impl Default for ListState {
    fn default() -> Self {
        Self::new(DEFAULT_THUMBNAIL_WINDOW)
    }
}

impl ListState {
    /// Seed state: loading, nothing fetched yet.
    pub fn new(thumbnail_window: usize) -> Self {
        Self {
            status: ListStatus::Loading,
            elements: Arc::new(Vec::new()),
            thumbnails: HashMap::new(),
            thumbnail_window: thumbnail_window.max(1),
            generation: 0,
            persisted: false,
        }
    }

    /// Elements are displayable in these statuses.
    pub fn has_elements(&self) -> bool {
        matches!(
            self.status,
            ListStatus::Loaded | ListStatus::LoadingThumbnails(_) | ListStatus::Persisted
        )
    }

    pub fn thumbnail(&self, id: ElementId) -> Option<&Thumbnail> {
        self.thumbnails.get(&id)
    }

    pub fn thumbnail_request(&self) -> Result<&ThumbnailRequest, StatusMismatch> {
        match &self.status {
            ListStatus::LoadingThumbnails(request) => Ok(request),
            other => Err(StatusMismatch {
                expected: "loading_thumbnails",
                actual: other.name(),
            }),
        }
    }

    /// Indexes `[index, index + window)` whose thumbnail is not cached yet.
    pub(crate) fn thumbnail_window_at(&self, index: usize) -> Option<ThumbnailRequest> {
        let end = index
            .saturating_add(self.thumbnail_window)
            .min(self.elements.len());
        if index >= end {
            return None;
        }

        let mut request = ThumbnailRequest {
            indexes: Vec::new(),
            ids: Vec::new(),
            urls: Vec::new(),
        };
        for (offset, element) in self.elements[index..end].iter().enumerate() {
            if self.thumbnails.contains_key(&element.id) {
                continue;
            }
            request.indexes.push(index + offset);
            request.ids.push(element.id);
            request.urls.push(element.thumbnail_url.clone());
        }

        (!request.indexes.is_empty()).then_some(request)
    }
}
