use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::data_provider::AsyncImageDataProvider;
use crate::ui::async_image::feedback::{when_loaded, when_loading};
use crate::ui::async_image::intent::{AsyncImageEvent, AsyncImageIntent};
use crate::ui::async_image::reducer::AsyncImageReducer;
use crate::ui::async_image::state::AsyncImageState;
use crate::ui::mvi::{Feedback, LoopError, LoopHandle, System};

/// Loader for one image URL.
pub struct AsyncImageViewModel {
    system: LoopHandle<AsyncImageState, AsyncImageEvent>,
    input: mpsc::UnboundedSender<AsyncImageIntent>,
}

impl AsyncImageViewModel {
    pub fn new(url: impl Into<String>, provider: Arc<AsyncImageDataProvider>) -> Self {
        let (input, input_rx) = mpsc::unbounded_channel();
        let system = System::<AsyncImageReducer>::start(
            "async_image",
            AsyncImageState::new(url),
            vec![
                Feedback::input("async_image.user_input", input_rx, AsyncImageEvent::Ui),
                when_loading(Arc::clone(&provider)),
                when_loaded(provider),
            ],
        );

        Self { system, input }
    }

    pub fn state(&self) -> AsyncImageState {
        self.system.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<AsyncImageState> {
        self.system.subscribe()
    }

    pub fn send(&self, intent: AsyncImageIntent) {
        if self.input.send(intent).is_err() {
            tracing::trace!("image intent dropped (loop gone)");
        }
    }

    pub fn system(&self) -> &LoopHandle<AsyncImageState, AsyncImageEvent> {
        &self.system
    }

    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&AsyncImageState) -> bool,
    ) -> Result<AsyncImageState, LoopError> {
        self.system.wait_for(predicate).await
    }
}
