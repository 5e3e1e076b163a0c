//! WebSocket connection handlers.
//!
//! Each connection gets a server-generated id and an outbound channel. Frames
//! from the client are parsed and forwarded to the command dispatcher; the
//! dispatcher's output arrives on the channel and is written back as text.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory},
    infrastructure::dto::websocket::ClientEvent,
    ui::{dispatcher::DispatcherHandle, state::AppState},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.dispatcher))
}

async fn handle_socket(socket: WebSocket, dispatcher: DispatcherHandle) {
    let connection_id = ConnectionIdFactory::generate();
    let (mut sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive events
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    if let Err(e) = dispatcher.connect(connection_id.clone(), tx) {
        tracing::error!("Cannot register connection '{}': {}", connection_id, e);
        return;
    }
    tracing::info!("Connection '{}' opened", connection_id);

    let recv_connection_id = connection_id.clone();
    let recv_dispatcher = dispatcher.clone();

    // Spawn a task to receive frames from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", recv_connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    if !forward_frame(&recv_dispatcher, &recv_connection_id, text.as_str()) {
                        break;
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push dispatcher output to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(text) = rx.recv().await {
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if let Err(e) = dispatcher.disconnect(connection_id.clone()) {
        tracing::warn!("Cannot deregister connection '{}': {}", connection_id, e);
    }
    tracing::info!("Connection '{}' closed", connection_id);
}

/// Parse one text frame and hand it to the dispatcher.
///
/// Malformed frames are logged and skipped. Returns `false` once the
/// dispatcher is gone.
fn forward_frame(dispatcher: &DispatcherHandle, connection_id: &ConnectionId, text: &str) -> bool {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(
                "Ignored malformed frame from '{}': {}",
                connection_id,
                e
            );
            return true;
        }
    };

    match dispatcher.command(connection_id.clone(), event) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Dropped frame from '{}': {}", connection_id, e);
            false
        }
    }
}
