//! The chat widget itself.

use tracing::{error, info, warn};

use super::markup::RenderedMessage;
use super::message::{Message, Sender};
use super::view::WidgetView;
use crate::backend::{ChatbotRequest, ExchangeError};

/// Default prefix for errors reported by the backend.
pub const DEFAULT_SERVER_ERROR_PREFIX: &str = "Server error: ";

/// Default text shown when the backend cannot be reached.
pub const DEFAULT_CONNECTION_ERROR: &str =
    "Connection error to server. Check console for details.";

/// Fixed texts the widget shows on failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetLabels {
    /// Prepended to an application error returned by the backend.
    pub server_error_prefix: String,
    /// Shown for transport failures and non-2xx responses.
    pub connection_error: String,
}

impl Default for WidgetLabels {
    fn default() -> Self {
        Self {
            server_error_prefix: DEFAULT_SERVER_ERROR_PREFIX.to_string(),
            connection_error: DEFAULT_CONNECTION_ERROR.to_string(),
        }
    }
}

/// Open/loading flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetState {
    pub is_open: bool,
    pub is_loading: bool,
}

/// Chat widget bound to a set of elements.
///
/// Submission is split in two halves so that the widget is never borrowed
/// across the network call: [`begin_exchange`](Self::begin_exchange) performs
/// the immediate UI work and yields the request to send, and
/// [`finish_exchange`](Self::finish_exchange) renders whatever came back.
/// Overlapping exchanges are neither queued nor deduplicated; they share the
/// single loading flag.
#[derive(Debug)]
pub struct ChatWidget<V> {
    view: V,
    state: WidgetState,
    labels: WidgetLabels,
    panel_wired: bool,
    messages: Vec<Message>,
}

impl<V: WidgetView> ChatWidget<V> {
    /// Wire the widget to its elements.
    pub fn init(view: V, labels: WidgetLabels) -> Self {
        let panel_wired = view.has_panel_controls();
        if !panel_wired {
            warn!(
                name: "widget.panel.unwired",
                "Panel controls missing, open/close disabled"
            );
        }
        Self {
            view,
            state: WidgetState::default(),
            labels,
            panel_wired,
            messages: Vec::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> WidgetState {
        self.state
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    #[must_use]
    pub fn labels(&self) -> &WidgetLabels {
        &self.labels
    }

    /// Messages appended so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Reveal the panel.
    pub fn open(&mut self) {
        if !self.panel_wired {
            return;
        }
        self.view.set_panel_visible(true);
        self.view.set_trigger_visible(false);
        self.view.scroll_to_bottom();
        self.view.focus_input();
        self.state.is_open = true;
    }

    /// Hide the panel.
    pub fn close(&mut self) {
        if !self.panel_wired {
            return;
        }
        self.view.set_panel_visible(false);
        self.view.set_trigger_visible(true);
        self.view.blur_input();
        self.state.is_open = false;
    }

    /// Render a message into the transcript and scroll to the bottom.
    pub fn append_message(&mut self, text: impl Into<String>, sender: Sender) {
        let message = Message::new(text, sender);
        self.view.append_entry(RenderedMessage::render(&message));
        self.view.scroll_to_bottom();
        self.messages.push(message);
    }

    /// Synchronous half of a submission.
    ///
    /// Returns `None` (and touches nothing) when `text` is blank. Otherwise
    /// appends the trimmed text as a user message, clears the input, raises
    /// the loading flag and returns the request to send.
    pub fn begin_exchange(&mut self, text: &str) -> Option<ChatbotRequest> {
        let message = text.trim();
        if message.is_empty() {
            return None;
        }

        self.append_message(message, Sender::User);
        self.view.clear_input();
        self.set_loading(true);

        info!(
            name: "widget.exchange.started",
            chars = message.chars().count(),
            "Submitting message"
        );
        Some(ChatbotRequest::new(message))
    }

    /// Completion half of a submission.
    ///
    /// Always clears the loading flag. Failures are logged and rendered;
    /// nothing is propagated.
    pub fn finish_exchange(&mut self, outcome: Result<Option<String>, ExchangeError>) {
        self.set_loading(false);

        match outcome {
            Ok(Some(text)) => self.append_message(text, Sender::Ai),
            Ok(None) => {
                warn!(
                    name: "widget.exchange.empty",
                    "Backend reply carried neither a response nor an error"
                );
            }
            Err(ExchangeError::Application(message)) => {
                warn!(name: "widget.exchange.rejected", error = %message, "Backend reported an error");
                let text = format!("{}{message}", self.labels.server_error_prefix);
                self.append_message(text, Sender::Ai);
            }
            Err(e) => {
                error!(name: "widget.exchange.failed", error = %e, "Chatbot request failed");
                let text = self.labels.connection_error.clone();
                self.append_message(text, Sender::Ai);
            }
        }
    }

    fn set_loading(&mut self, loading: bool) {
        self.state.is_loading = loading;
        self.view.set_loading_visible(loading);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::MemoryView;
    use reqwest::StatusCode;

    fn widget() -> ChatWidget<MemoryView> {
        ChatWidget::init(MemoryView::new(4), WidgetLabels::default())
    }

    fn last_text(widget: &ChatWidget<MemoryView>) -> String {
        widget
            .view()
            .entries()
            .last()
            .map(|entry| entry.body.to_plain_text())
            .unwrap_or_default()
    }

    #[test]
    fn test_open_close_round_trip() {
        let mut widget = widget();
        assert!(!widget.state().is_open);

        widget.open();
        assert!(widget.state().is_open);
        assert!(widget.view().is_panel_visible());
        assert!(!widget.view().is_trigger_visible());
        assert!(widget.view().is_input_focused());

        widget.close();
        assert!(!widget.state().is_open);
        assert!(!widget.view().is_panel_visible());
        assert!(widget.view().is_trigger_visible());
        assert!(!widget.view().is_input_focused());
    }

    #[test]
    fn test_reopen_focuses_again() {
        let mut widget = widget();
        widget.open();
        widget.close();
        widget.open();
        assert!(widget.view().is_input_focused());
    }

    #[test]
    fn test_open_scrolls_to_bottom() {
        let mut widget = widget();
        for i in 0..10 {
            widget.append_message(format!("line {i}"), Sender::User);
        }
        widget.view_mut().scroll_to(0);

        widget.open();
        assert_eq!(widget.view().scroll_top(), widget.view().max_scroll());
    }

    #[test]
    fn test_unwired_panel_is_inert() {
        let mut widget = ChatWidget::init(
            MemoryView::without_panel_controls(4),
            WidgetLabels::default(),
        );
        widget.open();
        assert!(!widget.state().is_open);
        assert!(!widget.view().is_panel_visible());
        assert!(widget.view().is_trigger_visible());
    }

    #[test]
    fn test_blank_submission_is_ignored() {
        let mut widget = widget();
        assert!(widget.begin_exchange("").is_none());
        assert!(widget.begin_exchange("   ").is_none());
        assert!(widget.view().entries().is_empty());
        assert!(!widget.state().is_loading);
    }

    #[test]
    fn test_begin_exchange() {
        let mut widget = widget();
        widget.view_mut().set_input("  hello ");

        let request = widget.begin_exchange("  hello ").unwrap();
        assert_eq!(request.message, "hello");
        assert_eq!(widget.messages(), &[Message::user("hello")]);
        assert_eq!(widget.view().input(), "");
        assert!(widget.state().is_loading);
        assert!(widget.view().is_loading_visible());
    }

    #[test]
    fn test_finish_with_response() {
        let mut widget = widget();
        widget.begin_exchange("hello");
        widget.finish_exchange(Ok(Some("Hi there".to_string())));

        assert_eq!(last_text(&widget), "Hi there");
        assert_eq!(widget.messages().last().unwrap().sender(), Sender::Ai);
        assert!(!widget.view().is_loading_visible());
    }

    #[test]
    fn test_finish_with_application_error() {
        let mut widget = widget();
        widget.begin_exchange("hello");
        widget.finish_exchange(Err(ExchangeError::Application("bad input".to_string())));

        assert_eq!(last_text(&widget), "Server error: bad input");
        assert!(!widget.state().is_loading);
    }

    #[test]
    fn test_finish_with_http_error() {
        let mut widget = widget();
        widget.begin_exchange("hello");
        widget.finish_exchange(Err(ExchangeError::Http(StatusCode::INTERNAL_SERVER_ERROR)));

        assert_eq!(last_text(&widget), DEFAULT_CONNECTION_ERROR);
        assert!(!widget.view().is_loading_visible());
    }

    #[test]
    fn test_finish_with_nothing() {
        let mut widget = widget();
        widget.begin_exchange("hello");
        widget.finish_exchange(Ok(None));

        assert_eq!(widget.messages().len(), 1);
        assert!(!widget.state().is_loading);
    }

    #[test]
    fn test_custom_labels() {
        let labels = WidgetLabels {
            server_error_prefix: "Erreur serveur : ".to_string(),
            connection_error: "offline".to_string(),
        };
        let mut widget = ChatWidget::init(MemoryView::default(), labels);
        widget.finish_exchange(Err(ExchangeError::Application("x".to_string())));
        assert_eq!(last_text(&widget), "Erreur serveur : x");
    }

    #[test]
    fn test_overlapping_exchanges_share_loading_flag() {
        let mut widget = widget();
        widget.begin_exchange("first");
        widget.begin_exchange("second");

        widget.finish_exchange(Ok(Some("second answer".to_string())));
        // One request is still in flight, but the shared flag is already down.
        assert!(!widget.state().is_loading);

        widget.finish_exchange(Ok(Some("first answer".to_string())));
        let texts: Vec<_> = widget.messages().iter().map(Message::text).collect();
        assert_eq!(
            texts,
            ["first", "second", "second answer", "first answer"]
        );
    }

    #[test]
    fn test_append_message_renders_breaks_and_scrolls() {
        let mut widget = ChatWidget::init(MemoryView::new(1), WidgetLabels::default());
        widget.append_message("a\nb", Sender::User);

        let entry = &widget.view().entries()[0];
        assert_eq!(entry.body.to_html(), "a<br>b");
        assert_eq!(widget.view().scroll_top(), widget.view().max_scroll());
        assert_eq!(widget.view().scroll_top(), 1);
    }
}
