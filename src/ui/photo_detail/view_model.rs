use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::data_provider::PhotoDetailDataProvider;
use crate::ui::list::Element;
use crate::ui::mvi::{Feedback, LoopError, LoopHandle, System};
use crate::ui::photo_detail::feedback::{when_loading, when_persisting};
use crate::ui::photo_detail::intent::{PhotoDetailEvent, PhotoDetailIntent};
use crate::ui::photo_detail::reducer::PhotoDetailReducer;
use crate::ui::photo_detail::state::PhotoDetailState;

pub struct PhotoDetailViewModel {
    system: LoopHandle<PhotoDetailState, PhotoDetailEvent>,
    input: mpsc::UnboundedSender<PhotoDetailIntent>,
}

impl PhotoDetailViewModel {
    /// Opens idle; loading starts on [`PhotoDetailIntent::OnAppear`].
    pub fn new(element: Element, provider: Arc<PhotoDetailDataProvider>) -> Self {
        Self::with_state(PhotoDetailState::new(element), provider)
    }

    pub fn with_state(initial: PhotoDetailState, provider: Arc<PhotoDetailDataProvider>) -> Self {
        let (input, input_rx) = mpsc::unbounded_channel();
        let system = System::<PhotoDetailReducer>::start(
            "photo_detail",
            initial,
            vec![
                Feedback::input("photo_detail.user_input", input_rx, PhotoDetailEvent::Ui),
                when_loading(Arc::clone(&provider)),
                when_persisting(provider),
            ],
        );

        Self { system, input }
    }

    pub fn state(&self) -> PhotoDetailState {
        self.system.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<PhotoDetailState> {
        self.system.subscribe()
    }

    pub fn send(&self, intent: PhotoDetailIntent) {
        if self.input.send(intent).is_err() {
            tracing::trace!("photo detail intent dropped (loop gone)");
        }
    }

    pub fn system(&self) -> &LoopHandle<PhotoDetailState, PhotoDetailEvent> {
        &self.system
    }

    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&PhotoDetailState) -> bool,
    ) -> Result<PhotoDetailState, LoopError> {
        self.system.wait_for(predicate).await
    }
}
