//! In-memory element model.

use super::markup::RenderedMessage;
use super::view::WidgetView;

/// Default number of transcript lines visible without scrolling.
pub const DEFAULT_VIEWPORT_LINES: usize = 12;

/// Element state held in memory.
///
/// Mirrors what a page would hold in its elements: visibility flags, the input
/// field, and the transcript with its scroll position. Heights are measured in
/// rendered lines.
#[derive(Debug, Clone)]
pub struct MemoryView {
    panel_controls: bool,
    panel_visible: bool,
    trigger_visible: bool,
    loading_visible: bool,
    input: String,
    input_focused: bool,
    entries: Vec<RenderedMessage>,
    viewport_lines: usize,
    scroll_top: usize,
}

impl Default for MemoryView {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_LINES)
    }
}

impl MemoryView {
    /// Create a view with all panel controls present, panel hidden and
    /// trigger shown.
    #[must_use]
    pub fn new(viewport_lines: usize) -> Self {
        Self {
            panel_controls: true,
            panel_visible: false,
            trigger_visible: true,
            loading_visible: false,
            input: String::new(),
            input_focused: false,
            entries: Vec::new(),
            viewport_lines,
            scroll_top: 0,
        }
    }

    /// Create a view whose panel controls are missing.
    #[must_use]
    pub fn without_panel_controls(viewport_lines: usize) -> Self {
        Self {
            panel_controls: false,
            ..Self::new(viewport_lines)
        }
    }

    /// Set the input field's value, as typing would.
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn is_input_focused(&self) -> bool {
        self.input_focused
    }

    #[must_use]
    pub fn is_panel_visible(&self) -> bool {
        self.panel_visible
    }

    #[must_use]
    pub fn is_trigger_visible(&self) -> bool {
        self.trigger_visible
    }

    #[must_use]
    pub fn is_loading_visible(&self) -> bool {
        self.loading_visible
    }

    #[must_use]
    pub fn entries(&self) -> &[RenderedMessage] {
        &self.entries
    }

    #[must_use]
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Total height of the transcript content.
    #[must_use]
    pub fn scroll_height(&self) -> usize {
        self.entries.iter().map(RenderedMessage::height).sum()
    }

    /// Largest reachable scroll position.
    #[must_use]
    pub fn max_scroll(&self) -> usize {
        self.scroll_height().saturating_sub(self.viewport_lines)
    }

    /// Scroll to an arbitrary position, clamped to the content.
    pub fn scroll_to(&mut self, position: usize) {
        self.scroll_top = position.min(self.max_scroll());
    }
}

impl WidgetView for MemoryView {
    fn has_panel_controls(&self) -> bool {
        self.panel_controls
    }

    fn set_panel_visible(&mut self, visible: bool) {
        self.panel_visible = visible;
    }

    fn set_trigger_visible(&mut self, visible: bool) {
        self.trigger_visible = visible;
    }

    fn set_loading_visible(&mut self, visible: bool) {
        self.loading_visible = visible;
    }

    fn focus_input(&mut self) {
        self.input_focused = true;
    }

    fn blur_input(&mut self) {
        self.input_focused = false;
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn append_entry(&mut self, entry: RenderedMessage) {
        self.entries.push(entry);
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_top = self.max_scroll();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::message::Message;

    fn entry(text: &str) -> RenderedMessage {
        RenderedMessage::render(&Message::user(text))
    }

    #[test]
    fn test_initial_state() {
        let view = MemoryView::default();
        assert!(view.has_panel_controls());
        assert!(!view.is_panel_visible());
        assert!(view.is_trigger_visible());
        assert!(!view.is_loading_visible());
        assert_eq!(view.scroll_height(), 0);
    }

    #[test]
    fn test_scroll_metrics() {
        let mut view = MemoryView::new(2);
        view.append_entry(entry("a\nb"));
        view.append_entry(entry("c\nd\ne"));
        assert_eq!(view.scroll_height(), 5);
        assert_eq!(view.max_scroll(), 3);

        view.scroll_to(100);
        assert_eq!(view.scroll_top(), 3);

        view.scroll_to(0);
        view.scroll_to_bottom();
        assert_eq!(view.scroll_top(), view.max_scroll());
    }

    #[test]
    fn test_short_transcript_does_not_scroll() {
        let mut view = MemoryView::new(10);
        view.append_entry(entry("only"));
        view.scroll_to_bottom();
        assert_eq!(view.scroll_top(), 0);
    }
}
