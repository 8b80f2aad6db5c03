use axum::{
    Form, Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;

use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::info;

use crate::AppState;
use crate::backend::{ChatbotBackend, HttpChatbotBackend};
use crate::config::AppConfig;
use crate::ui::{render_page, render_transcript, render_widget};
use crate::widget::{ChatWidget, MemoryView, WidgetHandle, WidgetLabels};

/// Build the shared state: one widget wired to an in-memory element model.
pub fn build_state(config: Arc<AppConfig>, backend: Arc<dyn ChatbotBackend>) -> AppState {
    let labels = WidgetLabels {
        server_error_prefix: config.widget.server_error_label.clone(),
        connection_error: config.widget.connection_error_message.clone(),
    };
    let view = MemoryView::new(config.widget.viewport_lines);
    let widget = WidgetHandle::new(ChatWidget::init(view, labels), backend);

    AppState { widget, config }
}

/// Routes for the page, the widget fragments and static assets.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();

    Router::new()
        .route("/", get(index_handler))
        .route("/healthz", get(health_handler))
        .route("/widget", get(widget_handler))
        .route("/widget/open", post(open_handler))
        .route("/widget/close", post(close_handler))
        .route("/widget/messages", post(submit_handler))
        .route("/widget/transcript", get(transcript_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let backend = HttpChatbotBackend::new(&config.backend.url)?;

    info!(
        name: "backend.config.loaded",
        endpoint = %backend.endpoint(),
        "Chatbot backend configured"
    );

    let state = build_state(Arc::clone(&config), Arc::new(backend));
    let app = build_router(state);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Form body posted by the widget.
#[derive(Debug, Deserialize)]
struct SubmitForm {
    #[serde(default)]
    message: String,
}

/// GET / - Page hosting the widget.
async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    let title = &state.config.widget.title;
    let widget = state.widget.lock().await;
    Html(render_page(title, &render_widget(&widget, title)))
}

/// GET /healthz
async fn health_handler() -> &'static str {
    "ok"
}

/// GET /widget - Current widget fragment.
async fn widget_handler(State(state): State<AppState>) -> impl IntoResponse {
    widget_fragment(&state).await
}

/// POST /widget/open
async fn open_handler(State(state): State<AppState>) -> impl IntoResponse {
    state.widget.open().await;
    widget_fragment(&state).await
}

/// POST /widget/close
async fn close_handler(State(state): State<AppState>) -> impl IntoResponse {
    state.widget.close().await;
    widget_fragment(&state).await
}

/// POST /widget/messages - Submit the input field.
///
/// Returns as soon as the user message is rendered; the answer arrives through
/// transcript polling.
async fn submit_handler(
    State(state): State<AppState>,
    Form(form): Form<SubmitForm>,
) -> impl IntoResponse {
    state.widget.lock().await.view_mut().set_input(form.message.as_str());
    // Fire-and-forget: the exchange outlives this request.
    let _ = state.widget.submit(&form.message).await;
    widget_fragment(&state).await
}

/// GET /widget/transcript - Transcript fragment, polled while loading.
async fn transcript_handler(State(state): State<AppState>) -> impl IntoResponse {
    let widget = state.widget.lock().await;
    Html(render_transcript(&widget))
}

async fn widget_fragment(state: &AppState) -> Html<String> {
    let widget = state.widget.lock().await;
    Html(render_widget(&widget, &state.config.widget.title))
}
