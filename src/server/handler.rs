//! WebSocket connection handlers.
//!
//! Each connection runs the gateway state machine: unjoined until a
//! successful `join`, then a member of exactly one room until disconnect.
//! Every client event is answered with an `ack`; room traffic fans out over
//! the registry-derived subscriber list.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
    error::MessageError,
    message::{generate_location_message, generate_message},
    protocol::{ClientEvent, RoomSummary, ServerEvent},
    registry::{EventSender, RoomRegistry, SessionId},
};

use super::state::AppState;

/// Username under which the relay itself speaks.
const ADMIN_USERNAME: &str = "Admin";

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let session_id = Uuid::new_v4();
    tracing::info!("New websocket connection: '{}'", session_id);

    ws.on_upgrade(move |socket| handle_socket(socket, state, session_id))
}

/// Spawns a task that drains the rx channel into the WebSocket sink.
///
/// All outbound traffic for one connection flows through its channel, so
/// broadcasts never block on a slow socket; the channel buffers.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, session_id: SessionId) {
    let (sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let mut send_task = pusher_loop(rx, sender);

    let recv_state = state.clone();
    let recv_tx = tx.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on session '{}': {}", session_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch_event(&recv_state, session_id, &recv_tx, &text).await;
                }
                Message::Close(_) => {
                    tracing::debug!("Session '{}' requested close", session_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If either half finishes, tear the other one down.
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    handle_disconnect(&state, session_id).await;
}

async fn dispatch_event(state: &AppState, session_id: SessionId, tx: &EventSender, text: &str) {
    match serde_json::from_str::<ClientEvent>(text) {
        Ok(ClientEvent::Join { username, room }) => {
            handle_join(state, session_id, tx, &username, &room).await;
        }
        Ok(ClientEvent::SendMessage { text }) => {
            handle_send_message(state, session_id, tx, &text).await;
        }
        Ok(ClientEvent::SendLocation {
            latitude,
            longitude,
        }) => {
            handle_send_location(state, session_id, tx, latitude, longitude).await;
        }
        Err(e) => {
            tracing::warn!(
                "Dropping unrecognized event from session '{}': {}",
                session_id,
                e
            );
        }
    }
}

async fn handle_join(
    state: &AppState,
    session_id: SessionId,
    tx: &EventSender,
    username: &str,
    room: &str,
) {
    let mut registry = state.registry.lock().await;

    let user = match registry.add_user(session_id, username, room, tx.clone()) {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Join rejected for session '{}': {}", session_id, e);
            send_event(tx, &ServerEvent::ack("join", Some(e.to_string())));
            return;
        }
    };
    tracing::info!(
        "Session '{}' joined room '{}' as '{}'",
        session_id,
        user.room,
        user.username
    );

    send_event(
        tx,
        &ServerEvent::Message(generate_message(ADMIN_USERNAME, "Welcome!")),
    );
    broadcast_to_room(
        &registry,
        &user.room,
        Some(session_id),
        &ServerEvent::Message(generate_message(
            ADMIN_USERNAME,
            &format!("{} has joined!", user.username),
        )),
    );
    broadcast_to_room(&registry, &user.room, None, &room_data(&registry, &user.room));
    send_event(tx, &ServerEvent::ack("join", None));
}

async fn handle_send_message(
    state: &AppState,
    session_id: SessionId,
    tx: &EventSender,
    text: &str,
) {
    let registry = state.registry.lock().await;

    let Some(user) = registry.get_user(&session_id) else {
        tracing::warn!("Dropping message from unjoined session '{}'", session_id);
        send_event(
            tx,
            &ServerEvent::ack("sendMessage", Some(MessageError::NotJoined.to_string())),
        );
        return;
    };

    if state.filter.is_profane(text) {
        tracing::warn!("Rejected profane message from '{}'", user.username);
        send_event(
            tx,
            &ServerEvent::ack(
                "sendMessage",
                Some(MessageError::ProfanityRejected.to_string()),
            ),
        );
        return;
    }

    broadcast_to_room(
        &registry,
        &user.room,
        None,
        &ServerEvent::Message(generate_message(&user.username, text)),
    );
    send_event(tx, &ServerEvent::ack("sendMessage", None));
}

async fn handle_send_location(
    state: &AppState,
    session_id: SessionId,
    tx: &EventSender,
    latitude: f64,
    longitude: f64,
) {
    let registry = state.registry.lock().await;

    let Some(user) = registry.get_user(&session_id) else {
        tracing::warn!("Dropping location from unjoined session '{}'", session_id);
        send_event(
            tx,
            &ServerEvent::ack("sendLocation", Some(MessageError::NotJoined.to_string())),
        );
        return;
    };

    let url = format!("https://google.com/maps?q={latitude},{longitude}");
    broadcast_to_room(
        &registry,
        &user.room,
        None,
        &ServerEvent::Location(generate_location_message(&user.username, &url)),
    );
    send_event(tx, &ServerEvent::ack("sendLocation", None));
}

async fn handle_disconnect(state: &AppState, session_id: SessionId) {
    let mut registry = state.registry.lock().await;

    let Some(user) = registry.remove_user(&session_id) else {
        tracing::debug!("Session '{}' disconnected without joining", session_id);
        return;
    };
    tracing::info!(
        "Session '{}' ('{}') left room '{}'",
        session_id,
        user.username,
        user.room
    );

    broadcast_to_room(
        &registry,
        &user.room,
        None,
        &ServerEvent::Message(generate_message(
            ADMIN_USERNAME,
            &format!("{} has left!", user.username),
        )),
    );
    broadcast_to_room(&registry, &user.room, None, &room_data(&registry, &user.room));
}

fn room_data(registry: &RoomRegistry, room: &str) -> ServerEvent {
    ServerEvent::RoomData {
        room: room.to_string(),
        users: registry.users_in_room(room),
    }
}

fn send_event(tx: &EventSender, event: &ServerEvent) {
    let payload = serde_json::to_string(event).unwrap();
    if tx.send(payload).is_err() {
        tracing::warn!("Failed to push event to a closing connection");
    }
}

fn broadcast_to_room(
    registry: &RoomRegistry,
    room: &str,
    except: Option<SessionId>,
    event: &ServerEvent,
) {
    let payload = serde_json::to_string(event).unwrap();
    for (id, sender) in registry.subscribers(room) {
        if Some(id) == except {
            continue;
        }
        if sender.send(payload.clone()).is_err() {
            tracing::warn!("Failed to push event to session '{}'", id);
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// List currently occupied rooms and their occupants.
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummary>> {
    let registry = state.registry.lock().await;

    let summaries = registry
        .room_names()
        .into_iter()
        .map(|room| {
            let users = registry
                .users_in_room(&room)
                .into_iter()
                .map(|user| user.username)
                .collect();
            RoomSummary { room, users }
        })
        .collect();

    Json(summaries)
}
