//! WebSocket transport for the live search dropdown.
//!
//! Each connection owns one [`SearchSession`]. Client messages drive the
//! session; every view change is pushed back as a JSON `SearchView`.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use blitz_core::{SearchSession, SessionError};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::metrics::{WS_INVALID_MESSAGES, WS_SESSIONS_ACTIVE, WS_SESSIONS_TOTAL, WS_VIEWS_SENT};
use crate::state::AppState;

/// Message sent by the client to drive its search session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// The search field text changed.
    Input { text: String },
    /// The search field gained focus.
    Focus,
    /// The user clicked outside the dropdown.
    Dismiss,
}

impl ClientMessage {
    fn apply(self, session: &SearchSession) -> Result<(), SessionError> {
        match self {
            ClientMessage::Input { text } => session.input(text),
            ClientMessage::Focus => session.focus(),
            ClientMessage::Dismiss => session.dismiss(),
        }
    }
}

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Handle a single WebSocket connection.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let session_id = Uuid::new_v4();

    let session = SearchSession::spawn(Arc::clone(state.orchestrator()));
    let mut views = session.subscribe();

    WS_SESSIONS_TOTAL.inc();
    WS_SESSIONS_ACTIVE.inc();

    info!(%session_id, "WebSocket client connected");

    // Push the current view, then every change after it
    let send_task = tokio::spawn(async move {
        loop {
            let view = views.borrow_and_update().clone();
            match serde_json::to_string(&view) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        debug!("WebSocket send failed, client disconnected");
                        break;
                    }
                    WS_VIEWS_SENT.inc();
                }
                Err(e) => {
                    error!("Failed to serialize SearchView: {}", e);
                }
            }

            if views.changed().await.is_err() {
                debug!("Search session closed");
                break;
            }
        }
    });

    while let Some(result) = receiver.next().await {
        match result {
            Ok(Message::Close(_)) => {
                debug!("WebSocket client requested close");
                break;
            }
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(message) => {
                    if let Err(e) = message.apply(&session) {
                        warn!(%session_id, "Dropping client message: {}", e);
                        break;
                    }
                }
                Err(e) => {
                    WS_INVALID_MESSAGES.inc();
                    debug!("Ignoring unparseable client message: {}", e);
                }
            },
            Ok(_) => {
                // Ping/pong handled by axum, binary ignored
            }
            Err(e) => {
                warn!("WebSocket receive error: {}", e);
                break;
            }
        }
    }

    send_task.abort();
    session.shutdown().await;
    WS_SESSIONS_ACTIVE.dec();
    info!(%session_id, "WebSocket client disconnected");
}
