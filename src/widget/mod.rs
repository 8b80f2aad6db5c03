//! Chat widget core.
//!
//! The widget is independent of any particular host: it drives its elements
//! through [`WidgetView`] and exchanges messages through
//! [`ChatbotBackend`](crate::backend::ChatbotBackend).
//!
//! # Example
//!
//! ```rust
//! use chat_widget::widget::{ChatWidget, MemoryView, Sender, WidgetLabels};
//!
//! let mut widget = ChatWidget::init(MemoryView::default(), WidgetLabels::default());
//! widget.open();
//! widget.append_message("Hello\nworld", Sender::Ai);
//!
//! assert!(widget.state().is_open);
//! assert_eq!(widget.view().entries()[0].body.to_html(), "Hello<br>world");
//! ```

mod chat_widget;
mod handle;
pub mod markup;
mod memory;
mod message;
mod view;

pub use chat_widget::{
    ChatWidget, DEFAULT_CONNECTION_ERROR, DEFAULT_SERVER_ERROR_PREFIX, WidgetLabels, WidgetState,
};
pub use handle::WidgetHandle;
pub use markup::{Markup, Node, RenderedMessage};
pub use memory::{DEFAULT_VIEWPORT_LINES, MemoryView};
pub use message::{Message, Sender};
pub use view::WidgetView;
