//! Element handles the widget drives.

use super::markup::RenderedMessage;

/// The set of elements a [`ChatWidget`](super::ChatWidget) manipulates.
///
/// The widget never looks elements up on its own; whatever hosts it passes an
/// implementation of this trait at initialisation. [`MemoryView`] is the
/// in-process implementation used by the HTTP host and by tests.
///
/// [`MemoryView`]: super::MemoryView
pub trait WidgetView: Send {
    /// Whether the open trigger, close control and panel are all present.
    ///
    /// Checked once when the widget is initialised; open/close are inert
    /// when this returns `false`.
    fn has_panel_controls(&self) -> bool;

    fn set_panel_visible(&mut self, visible: bool);

    fn set_trigger_visible(&mut self, visible: bool);

    fn set_loading_visible(&mut self, visible: bool);

    fn focus_input(&mut self);

    fn blur_input(&mut self);

    fn clear_input(&mut self);

    /// Append a rendered entry to the transcript.
    fn append_entry(&mut self, entry: RenderedMessage);

    /// Scroll the transcript to its maximum scroll position.
    fn scroll_to_bottom(&mut self);
}
