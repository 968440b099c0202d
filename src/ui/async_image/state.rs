use crate::media::Image;
use crate::ui::mvi::{StatusMismatch, UiState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncImageStatus {
    Idle,
    Loading,
    Loaded(Image),
    /// Carries the placeholder shown in place of the image.
    Failed(Image),
}

impl AsyncImageStatus {
    pub fn name(&self) -> &'static str {
        match self {
            AsyncImageStatus::Idle => "idle",
            AsyncImageStatus::Loading => "loading",
            AsyncImageStatus::Loaded(_) => "loaded",
            AsyncImageStatus::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncImageState {
    pub url: String,
    pub status: AsyncImageStatus,
}

impl UiState for AsyncImageState {}

impl AsyncImageState {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: AsyncImageStatus::Idle,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.status, AsyncImageStatus::Loaded(_))
    }

    /// The loaded image.
    pub fn image(&self) -> Result<&Image, StatusMismatch> {
        match &self.status {
            AsyncImageStatus::Loaded(image) => Ok(image),
            other => Err(StatusMismatch {
                expected: "loaded",
                actual: other.name(),
            }),
        }
    }

    /// The placeholder of a failed load.
    pub fn placeholder(&self) -> Result<&Image, StatusMismatch> {
        match &self.status {
            AsyncImageStatus::Failed(image) => Ok(image),
            other => Err(StatusMismatch {
                expected: "failed",
                actual: other.name(),
            }),
        }
    }

    /// Whatever a view would draw right now, if anything.
    pub fn displayed(&self) -> Option<&Image> {
        match &self.status {
            AsyncImageStatus::Loaded(image) | AsyncImageStatus::Failed(image) => Some(image),
            AsyncImageStatus::Idle | AsyncImageStatus::Loading => None,
        }
    }
}
