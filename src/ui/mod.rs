//! Server-rendered HTML.
//!
//! The page is plain HTML driven by htmx: every widget control posts to the
//! widget host and swaps in a freshly rendered fragment.
//!
//! # Structure
//!
//! - [`page`]: document shell
//! - [`chat`]: widget, transcript and loading-indicator fragments

pub mod chat;
pub mod page;

pub use chat::{render_transcript, render_widget};
pub use page::render_page;
