//! Widget fragments.
//!
//! Element ids are stable: `chatbot-open-btn`, `chatbot-close-btn`,
//! `chatbot-window`, `chatbot-form`, `chatbot-input`, `chatbot-messages` and
//! `chatbot-loading`. Hidden elements carry the `hidden` class.

use crate::widget::markup::{RenderedMessage, escape_html};
use crate::widget::{ChatWidget, MemoryView};

/// Poll interval while a request is in flight.
const LOADING_POLL: &str = "every 1s";

fn classes(base: &str, hidden: bool) -> String {
    if hidden {
        format!("{base} hidden")
    } else {
        base.to_string()
    }
}

/// Render the whole widget: trigger, panel, transcript and form.
pub fn render_widget(widget: &ChatWidget<MemoryView>, title: &str) -> String {
    let view = widget.view();
    let title = escape_html(title);
    let trigger_class = classes("chatbot-open-btn", !view.is_trigger_visible());
    let window_class = classes("chatbot-window", !view.is_panel_visible());
    let input_value = escape_html(view.input());
    let autofocus = if view.is_input_focused() {
        " autofocus"
    } else {
        ""
    };
    let transcript = render_transcript(widget);

    format!(
        r##"<div id="chatbot" class="chatbot">
    <button id="chatbot-open-btn" class="{trigger_class}" type="button"
            hx-post="/widget/open" hx-target="#chatbot" hx-swap="outerHTML"
            aria-label="Open chat">Chat</button>
    <section id="chatbot-window" class="{window_class}" aria-label="{title}">
        <header class="chatbot-header">
            <h2>{title}</h2>
            <button id="chatbot-close-btn" type="button"
                    hx-post="/widget/close" hx-target="#chatbot" hx-swap="outerHTML"
                    aria-label="Close chat">&times;</button>
        </header>
        {transcript}
        <form id="chatbot-form" class="chatbot-form"
              hx-post="/widget/messages" hx-target="#chatbot" hx-swap="outerHTML">
            <input id="chatbot-input" name="message" type="text" autocomplete="off"
                   placeholder="Type your message..." value="{input_value}"{autofocus}>
            <button type="submit">Send</button>
        </form>
    </section>
</div>"##
    )
}

/// Render the transcript, including the loading indicator.
///
/// While loading, the fragment polls itself so that the answer shows up as
/// soon as the exchange completes.
pub fn render_transcript(widget: &ChatWidget<MemoryView>) -> String {
    let view = widget.view();
    let entries: String = view
        .entries()
        .iter()
        .map(RenderedMessage::to_html)
        .collect();
    let loading_class = classes("chatbot-loading", !view.is_loading_visible());
    let poll = if view.is_loading_visible() {
        format!(r#" hx-get="/widget/transcript" hx-trigger="{LOADING_POLL}" hx-swap="outerHTML""#)
    } else {
        String::new()
    };

    format!(
        r#"<div id="chatbot-messages" class="chatbot-messages" aria-live="polite"
             data-scroll-top="{scroll_top}" hx-on::load="this.scrollTop = this.scrollHeight"{poll}>{entries}<div id="chatbot-loading" class="{loading_class}">...</div></div>"#,
        scroll_top = view.scroll_top(),
    )
}
