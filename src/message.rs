//! Message envelope builders.
//!
//! Build the standard envelopes broadcast to a room, stamped with the
//! current time. Envelopes are transient; they exist only for the duration
//! of a broadcast.

use crate::protocol::{ChatMessage, LocationMessage};
use crate::time::now_utc_millis;

/// Build a chat message envelope from `username`.
pub fn generate_message(username: &str, text: &str) -> ChatMessage {
    ChatMessage {
        username: username.to_string(),
        text: text.to_string(),
        created_at: now_utc_millis(),
    }
}

/// Build a location link envelope from `username`.
pub fn generate_location_message(username: &str, url: &str) -> LocationMessage {
    LocationMessage {
        username: username.to_string(),
        url: url.to_string(),
        created_at: now_utc_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_message_carries_sender_and_text() {
        // given:
        let before = now_utc_millis();

        // when:
        let message = generate_message("alice", "hello");

        // then: envelope is stamped with the current time
        assert_eq!(message.username, "alice");
        assert_eq!(message.text, "hello");
        assert!(message.created_at >= before);
        assert!(message.created_at <= now_utc_millis());
    }

    #[test]
    fn test_generate_location_message_carries_sender_and_url() {
        // given:
        let before = now_utc_millis();

        // when:
        let message = generate_location_message("bob", "https://google.com/maps?q=1.5,2.5");

        // then:
        assert_eq!(message.username, "bob");
        assert_eq!(message.url, "https://google.com/maps?q=1.5,2.5");
        assert!(message.created_at >= before);
        assert!(message.created_at <= now_utc_millis());
    }
}
