//! Shared widget handle with fire-and-forget submission.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;

use super::chat_widget::ChatWidget;
use super::view::WidgetView;
use crate::backend::ChatbotBackend;

/// A widget shared between event sources, plus the backend it talks to.
pub struct WidgetHandle<V> {
    widget: Arc<Mutex<ChatWidget<V>>>,
    backend: Arc<dyn ChatbotBackend>,
}

impl<V> Clone for WidgetHandle<V> {
    fn clone(&self) -> Self {
        Self {
            widget: Arc::clone(&self.widget),
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<V> std::fmt::Debug for WidgetHandle<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetHandle").finish_non_exhaustive()
    }
}

impl<V: WidgetView + 'static> WidgetHandle<V> {
    pub fn new(widget: ChatWidget<V>, backend: Arc<dyn ChatbotBackend>) -> Self {
        Self {
            widget: Arc::new(Mutex::new(widget)),
            backend,
        }
    }

    /// Lock the widget for direct access.
    pub async fn lock(&self) -> MutexGuard<'_, ChatWidget<V>> {
        self.widget.lock().await
    }

    pub async fn open(&self) {
        self.widget.lock().await.open();
    }

    pub async fn close(&self) {
        self.widget.lock().await.close();
    }

    /// Submit `text`.
    ///
    /// The immediate UI work happens before this returns. The request itself
    /// runs on a detached task; its handle is returned for callers that want
    /// to wait, but dropping it does not cancel anything. Returns `None` for
    /// blank input.
    pub async fn submit(&self, text: &str) -> Option<JoinHandle<()>> {
        let request = self.widget.lock().await.begin_exchange(text)?;

        let widget = Arc::clone(&self.widget);
        let backend = Arc::clone(&self.backend);
        Some(tokio::spawn(async move {
            let outcome = backend.send(&request).await;
            widget.lock().await.finish_exchange(outcome);
        }))
    }
}
