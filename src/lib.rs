//! Chat widget host.
//!
//! A chat panel that can be opened and closed, a scrolling transcript, and a
//! form that submits user text to a chatbot backend (`POST /api/chatbot`) and
//! renders the answer or an error. Served as htmx-driven HTML by an axum
//! server.
//!
//! # Architecture
//!
//! - **Widget**: host-independent state machine over injected element handles
//! - **Backend**: one JSON request/response exchange per submission
//! - **UI**: server-rendered HTML fragments with htmx attributes
//! - **Server**: axum routes mapping user actions onto widget operations
//!
//! # Modules
//!
//! - [`widget`]: widget core, safe markup, element model
//! - [`backend`]: chatbot backend trait and HTTP client
//! - [`ui`]: HTML rendering
//! - [`server`]: router and server start-up
//! - [`config`]: CLI, file and environment configuration
//! - [`telemetry`]: logging initialisation

pub mod backend;
pub mod config;
pub mod server;
pub mod telemetry;
pub mod ui;
pub mod widget;

use crate::config::AppConfig;
use crate::widget::{MemoryView, WidgetHandle};
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The single widget this server hosts.
    pub widget: WidgetHandle<MemoryView>,
    /// Global configuration.
    pub config: Arc<AppConfig>,
}
