use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::data_provider::{AsyncImageDataProvider, ListDataProvider};
use crate::ui::list::feedback::{when_loading_metadata, when_loading_thumbnails, when_persisting};
use crate::ui::list::intent::{ListEvent, ListIntent};
use crate::ui::list::reducer::ListReducer;
use crate::ui::list::state::ListState;
use crate::ui::mvi::{Feedback, LoopError, LoopHandle, System};

/// The list screen: metadata, thumbnail pagination and persistence.
pub struct ListViewModel {
    system: LoopHandle<ListState, ListEvent>,
    input: mpsc::UnboundedSender<ListIntent>,
}

impl ListViewModel {
    pub fn new(
        provider: Arc<ListDataProvider>,
        images: Arc<AsyncImageDataProvider>,
        thumbnail_window: usize,
    ) -> Self {
        Self::with_state(ListState::new(thumbnail_window), provider, images)
    }

    pub fn with_state(
        initial: ListState,
        provider: Arc<ListDataProvider>,
        images: Arc<AsyncImageDataProvider>,
    ) -> Self {
        let (input, input_rx) = mpsc::unbounded_channel();
        let system = System::<ListReducer>::start(
            "list",
            initial,
            vec![
                when_loading_metadata(Arc::clone(&provider)),
                when_loading_thumbnails(images),
                when_persisting(provider),
                Feedback::input("list.user_input", input_rx, ListEvent::Ui),
            ],
        );

        Self { system, input }
    }

    pub fn state(&self) -> ListState {
        self.system.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.system.subscribe()
    }

    pub fn send(&self, intent: ListIntent) {
        if self.input.send(intent).is_err() {
            tracing::trace!("list intent dropped (loop gone)");
        }
    }

    pub fn system(&self) -> &LoopHandle<ListState, ListEvent> {
        &self.system
    }

    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&ListState) -> bool,
    ) -> Result<ListState, LoopError> {
        self.system.wait_for(predicate).await
    }
}
