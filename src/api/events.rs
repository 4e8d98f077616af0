use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::{
        sse::{Event, KeepAlive, Sse},
        Response,
    },
};
use futures_util::{SinkExt, Stream, StreamExt};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};

use crate::models::DisplayEvent;
use crate::services::DisplayState;

/// Stream display changes (Server-Sent Events)
///
/// Each event is named `update` or `clear` and carries the JSON event as
/// data. A client that falls too far behind is disconnected.
#[utoipa::path(
    get,
    path = "/events",
    responses(
        (status = 200, description = "Event stream", content_type = "text/event-stream", body = DisplayEvent),
    ),
    tag = "Display"
)]
pub async fn handle_events(
    State(display): State<Arc<DisplayState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = display.subscribe();

    let stream = tokio_stream::StreamExt::map_while(BroadcastStream::new(rx), |result| {
        match result {
            Ok(event) => Some(event),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "Dropping lagging event subscriber");
                None
            }
        }
    })
    .map(|event| {
        Ok::<_, Infallible>(
            Event::default()
                .event(event.kind())
                .data(serde_json::to_string(&event).unwrap_or_default()),
        )
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Stream display changes (WebSocket)
///
/// Sends each event as a JSON text frame. Messages from the client are
/// ignored.
#[utoipa::path(
    get,
    path = "/ws",
    responses(
        (status = 101, description = "Switching to WebSocket"),
    ),
    tag = "Display"
)]
pub async fn handle_ws(
    State(display): State<Arc<DisplayState>>,
    ws: WebSocketUpgrade,
) -> Response {
    let rx = display.subscribe();
    ws.on_upgrade(move |socket| forward_events(socket, rx))
}

async fn forward_events(socket: WebSocket, mut rx: broadcast::Receiver<DisplayEvent>) {
    let (mut sender, mut receiver) = socket.split();
    tracing::info!("WebSocket connected");

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(event) => {
                    let text = serde_json::to_string(&event).unwrap_or_default();
                    if sender.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Dropping lagging WebSocket subscriber");
                    break;
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            msg = receiver.next() => match msg {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    let _ = sender.close().await;
    tracing::info!("WebSocket disconnected");
}
