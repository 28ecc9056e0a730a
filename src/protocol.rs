//! Wire protocol for the chat relay.
//!
//! All events travel as JSON text frames, internally tagged with a `type`
//! field. Client events are answered with an `ack` carrying the originating
//! event name, which stands in for the callback round-trip of a classic
//! socket-style API.

use serde::{Deserialize, Serialize};

use crate::registry::User;

/// Events a client sends to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Join a named room under a username
    Join { username: String, room: String },
    /// Send a chat message to the current room
    SendMessage { text: String },
    /// Share a geolocation with the current room
    SendLocation { latitude: f64, longitude: f64 },
}

/// Chat message envelope, as broadcast to a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub username: String,
    pub text: String,
    /// Unix timestamp in UTC milliseconds
    pub created_at: i64,
}

/// Location link envelope, as broadcast to a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMessage {
    pub username: String,
    pub url: String,
    /// Unix timestamp in UTC milliseconds
    pub created_at: i64,
}

/// Events the server pushes to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerEvent {
    /// A chat message (from a user or from the relay itself)
    Message(ChatMessage),
    /// A shared location link
    Location(LocationMessage),
    /// Current roster of a room
    RoomData { room: String, users: Vec<User> },
    /// Acknowledgment of a client event; `error` is omitted on success
    Ack {
        event: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl ServerEvent {
    /// Build the acknowledgment for `event`.
    pub fn ack(event: &str, error: Option<String>) -> Self {
        Self::Ack {
            event: event.to_string(),
            error,
        }
    }
}

/// One entry of the `GET /api/rooms` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub room: String,
    pub users: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_join_event_parses_from_wire_form() {
        // given:
        let raw = r#"{"type":"join","username":"alice","room":"lobby"}"#;

        // when:
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then:
        assert_eq!(
            event,
            ClientEvent::Join {
                username: "alice".to_string(),
                room: "lobby".to_string(),
            }
        );
    }

    #[test]
    fn test_send_location_event_parses_from_wire_form() {
        // given:
        let raw = r#"{"type":"sendLocation","latitude":35.68,"longitude":139.69}"#;

        // when:
        let event: ClientEvent = serde_json::from_str(raw).unwrap();

        // then:
        assert_eq!(
            event,
            ClientEvent::SendLocation {
                latitude: 35.68,
                longitude: 139.69,
            }
        );
    }

    #[test]
    fn test_message_event_wire_form_is_tagged_and_camel_cased() {
        // given:
        let event = ServerEvent::Message(ChatMessage {
            username: "alice".to_string(),
            text: "hello".to_string(),
            created_at: 1000,
        });

        // when:
        let value = serde_json::to_value(&event).unwrap();

        // then:
        assert_eq!(
            value,
            json!({
                "type": "message",
                "username": "alice",
                "text": "hello",
                "createdAt": 1000,
            })
        );
    }

    #[test]
    fn test_successful_ack_omits_the_error_field() {
        // given:
        let event = ServerEvent::ack("join", None);

        // when:
        let value = serde_json::to_value(&event).unwrap();

        // then:
        assert_eq!(value, json!({"type": "ack", "event": "join"}));
    }

    #[test]
    fn test_failed_ack_carries_the_error_string() {
        // given:
        let event = ServerEvent::ack("sendMessage", Some("Profanity is not allowed!".to_string()));

        // when:
        let value = serde_json::to_value(&event).unwrap();

        // then:
        assert_eq!(
            value,
            json!({
                "type": "ack",
                "event": "sendMessage",
                "error": "Profanity is not allowed!",
            })
        );
    }
}
