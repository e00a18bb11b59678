//! Page server.
//!
//! Serves the personal page and the htmx fragment endpoints that drive the
//! chat widget and the mobile menu. Widget state lives server-side, one
//! [`Session`](crate::session::Session) per page load.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use uuid::Uuid;

use crate::AppState;
use crate::client::{ChatTransport, HttpChatClient};
use crate::config::AppConfig;
use crate::nav::{NavMenu, SiteNav};
use crate::render;
use crate::session::{Session, SessionStore};
use crate::widget::{ChatController, SubmissionId, WidgetState};

/// Build the application state from configuration.
pub fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let transport: Arc<dyn ChatTransport> = Arc::new(HttpChatClient::new(&config.chat.endpoint)?);
    Ok(AppState {
        sessions: SessionStore::new(),
        transport,
        site: Arc::new(config.site.clone()),
        nav: Arc::new(SiteNav::new(config.site.sections.clone())),
    })
}

/// All routes, with request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/s/{id}/widget/open", post(open_widget))
        .route("/s/{id}/widget/close", post(close_widget))
        .route(
            "/s/{id}/widget/messages",
            get(get_messages).post(post_message),
        )
        .route("/s/{id}/widget/replies/{submission}", post(post_reply))
        .route("/s/{id}/nav/toggle", post(toggle_nav))
        .route("/s/{id}/nav/close", post(close_nav))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let state = build_state(&config)?;

    info!(
        name: "chat.config.loaded",
        endpoint = %config.chat.endpoint,
        "Chat endpoint configured"
    );

    spawn_session_sweeper(state.sessions.clone(), config.session.timeout());

    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Periodically drop sessions idle for longer than `timeout`.
fn spawn_session_sweeper(sessions: SessionStore, timeout: Duration) {
    let period = (timeout / 4).max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let removed = sessions.cleanup_expired_with_timeout(timeout);
            if removed > 0 {
                debug!(name: "session.swept", removed, remaining = sessions.len(), "Expired sessions removed");
            }
        }
    });
}

fn find_session(state: &AppState, id: &str) -> Result<Session, StatusCode> {
    state.sessions.get(id).ok_or(StatusCode::NOT_FOUND)
}

fn controller(
    state: &AppState,
    session: &Session,
) -> ChatController<WidgetState, Arc<dyn ChatTransport>> {
    ChatController::new(session.widget().clone(), Arc::clone(&state.transport))
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let session = state.sessions.create();
    info!(name: "session.created", session = %session.id(), "Visitor session created");
    Html(render::page(
        &state.site,
        &state.nav,
        session.id(),
        session.menu(),
        &session.widget().snapshot(),
    ))
}

async fn open_widget(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, StatusCode> {
    let session = find_session(&state, &id)?;
    controller(&state, &session).open();
    Ok(Html(render::chat_window(
        session.id(),
        &session.widget().snapshot(),
    )))
}

async fn close_widget(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, StatusCode> {
    let session = find_session(&state, &id)?;
    controller(&state, &session).close();
    Ok(Html(render::chat_window(
        session.id(),
        &session.widget().snapshot(),
    )))
}

#[derive(Debug, Deserialize)]
struct MessageForm {
    #[serde(default)]
    message: String,
}

async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<MessageForm>,
) -> Result<Html<String>, StatusCode> {
    let session = find_session(&state, &id)?;

    // Blank input appends nothing and leaves the field alone.
    let Some(pending) = controller(&state, &session).begin(&form.message) else {
        return Ok(Html(String::new()));
    };
    debug!(name: "widget.submission.started", session = %session.id(), submission = %pending.id, "Widget submission started");

    let html = render::submission_started(session.id(), &pending);
    session.hold_pending(pending);
    Ok(Html(html))
}

/// Requested by a typing indicator as soon as it is on the page.
async fn post_reply(
    State(state): State<AppState>,
    Path((id, submission)): Path<(String, Uuid)>,
) -> Result<Html<String>, StatusCode> {
    let session = find_session(&state, &id)?;
    let pending = session
        .take_pending(SubmissionId::from(submission))
        .ok_or(StatusCode::NOT_FOUND)?;

    let completed = controller(&state, &session).complete(pending).await;
    debug!(name: "widget.submission.completed", session = %session.id(), submission = %completed.id, outcome = ?completed.outcome, "Widget submission completed");

    Ok(Html(render::submission_reply(&completed)))
}

async fn get_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, StatusCode> {
    let session = find_session(&state, &id)?;
    Ok(Html(render::chat_messages(&session.widget().snapshot())))
}

async fn toggle_nav(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, StatusCode> {
    let session = find_session(&state, &id)?;
    let menu = session.update_menu(NavMenu::toggle);
    Ok(Html(render::nav_bar(session.id(), &state.site, &state.nav, menu)))
}

async fn close_nav(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, StatusCode> {
    let session = find_session(&state, &id)?;
    let menu = session.update_menu(NavMenu::close);
    Ok(Html(render::nav_bar(session.id(), &state.site, &state.nav, menu)))
}
