//! Shared helpers for integration tests.
//!
//! `TestServer` runs the real router in-process on an ephemeral port with a
//! private in-memory database. `WsClient` is a thin JSON wrapper around a
//! tokio-tungstenite connection.

#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use vibes_server::ServerConfig;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);
const SILENCE_WINDOW: Duration = Duration::from_millis(300);

pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl TestServer {
    /// Start a server without starter songs.
    pub async fn start() -> Self {
        Self::start_with_seed(false).await
    }

    pub async fn start_with_seed(seed_default_songs: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let config = ServerConfig {
            host: addr.ip().to_string(),
            port: addr.port(),
            database_url: "sqlite::memory:".to_string(),
            seed_default_songs,
        };

        let (shutdown, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let signal = async {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = vibes_server::run_with_listener(listener, config, signal).await {
                panic!("Test server failed: {e}");
            }
        });

        Self {
            addr,
            shutdown: Some(shutdown),
            task,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Open a WebSocket connection to `/ws`.
    pub async fn connect(&self) -> WsClient {
        let (stream, _) = connect_async(self.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        WsClient { stream }
    }

    /// Fetch `/api/playlist/{id}` as JSON.
    pub async fn snapshot(&self, playlist_id: &str) -> Value {
        reqwest::get(format!("{}/api/playlist/{}", self.base_url(), playlist_id))
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse JSON")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.task.abort();
    }
}

pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
}

impl WsClient {
    pub async fn send_event(&mut self, event: &str, data: Value) {
        self.send_raw(&json!({"event": event, "data": data}).to_string())
            .await;
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    /// Join `playlist_id` and return the `playlist-state` data.
    pub async fn join(&mut self, playlist_id: &str, username: &str) -> Value {
        self.send_event(
            "join-playlist",
            json!({"playlistId": playlist_id, "username": username}),
        )
        .await;
        self.expect_event("playlist-state").await
    }

    /// Next text frame as JSON.
    pub async fn recv(&mut self) -> Value {
        loop {
            let message = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for a frame")
                .expect("Connection closed")
                .expect("WebSocket error");
            if let Message::Text(text) = message {
                return serde_json::from_str(text.as_str()).expect("Frame is not JSON");
            }
        }
    }

    /// Next frame, which must be `event`; returns its data.
    pub async fn expect_event(&mut self, event: &str) -> Value {
        let frame = self.recv().await;
        assert_eq!(frame["event"], event, "unexpected frame: {frame}");
        frame["data"].clone()
    }

    /// Assert that nothing arrives for a short while.
    pub async fn expect_silence(&mut self) {
        if let Ok(Some(Ok(Message::Text(text)))) =
            tokio::time::timeout(SILENCE_WINDOW, self.stream.next()).await
        {
            panic!("expected no frame, got {text}");
        }
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}

pub fn song(title: &str, artist: &str) -> Value {
    json!({
        "title": title,
        "artist": artist,
        "duration": "3:00",
        "videoId": "x",
        "thumbnail": "y"
    })
}
