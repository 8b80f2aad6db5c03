//! Typed safe-text rendering.
//!
//! Message text is never spliced into HTML as a raw string. It is first split
//! into typed [`Node`]s: text runs, which are escaped when serialised, and
//! explicit line breaks, which serialise to `<br>`. This keeps user input and
//! backend responses from being interpreted as markup.

use super::message::{Message, Sender};

/// A single renderable node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Plain text, escaped on output.
    Text(String),
    /// An explicit line-break element.
    LineBreak,
}

/// An ordered sequence of safe nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    nodes: Vec<Node>,
}

impl Markup {
    /// Build markup from plain text.
    ///
    /// Each line-break sequence (`\r\n`, `\r` or `\n`) becomes exactly one
    /// [`Node::LineBreak`]. Empty text runs are not emitted.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut nodes = Vec::new();
        let mut run = String::new();
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\r' | '\n' => {
                    if c == '\r' && chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    if !run.is_empty() {
                        nodes.push(Node::Text(std::mem::take(&mut run)));
                    }
                    nodes.push(Node::LineBreak);
                }
                _ => run.push(c),
            }
        }
        if !run.is_empty() {
            nodes.push(Node::Text(run));
        }

        Self { nodes }
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of visual lines this markup occupies (at least one).
    #[must_use]
    pub fn line_count(&self) -> usize {
        1 + self
            .nodes
            .iter()
            .filter(|node| matches!(node, Node::LineBreak))
            .count()
    }

    /// Serialise to HTML, escaping every text run.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Text(text) => out.push_str(&escape_html(text)),
                Node::LineBreak => out.push_str("<br>"),
            }
        }
        out
    }

    /// Recover the visible text, with line breaks as `\n`.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        self.nodes
            .iter()
            .map(|node| match node {
                Node::Text(text) => text.as_str(),
                Node::LineBreak => "\n",
            })
            .collect()
    }
}

/// Escape all HTML-significant characters.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A message as it appears in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub sender: Sender,
    pub body: Markup,
}

impl RenderedMessage {
    /// Render a message into safe markup.
    #[must_use]
    pub fn render(message: &Message) -> Self {
        Self {
            sender: message.sender(),
            body: Markup::from_text(message.text()),
        }
    }

    /// Height of the entry in transcript lines.
    #[must_use]
    pub fn height(&self) -> usize {
        self.body.line_count()
    }

    /// Serialise the entry as a transcript `<div>`.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="message {}">{}</div>"#,
            self.sender.css_class(),
            self.body.to_html()
        )
    }
}
