//! In-memory room/user registry.
//!
//! Maps each connected session to its user record and outbound channel. The
//! per-room broadcast list is derived from this one table, so there is no
//! second source of truth to keep in sync.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::error::JoinError;

/// Opaque per-connection identifier, assigned by the gateway at upgrade time
/// and stable for the connection's lifetime.
pub type SessionId = Uuid;

/// Channel for pushing serialized server events to one connection.
pub type EventSender = mpsc::UnboundedSender<String>;

/// A user currently occupying a room.
///
/// Username and room are stored trimmed with their original casing; both are
/// compared case-insensitively. Records are never mutated in place — removal
/// and re-add is the only update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: SessionId,
    pub username: String,
    pub room: String,
}

/// Registry entry: the user record plus the session's outbound channel.
struct Registration {
    user: User,
    sender: EventSender,
}

/// Registry of all joined sessions.
///
/// Owned by the caller and injected into the gateway through the shared
/// application state; the registry itself does no locking.
pub struct RoomRegistry {
    users: HashMap<SessionId, Registration>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
        }
    }

    /// Register a user for `id`.
    ///
    /// Trims both fields and rejects the join when either is blank, when the
    /// session already joined, or when another user in the room holds the
    /// same username case-insensitively. On success returns a clone of the
    /// stored record, original casing preserved.
    pub fn add_user(
        &mut self,
        id: SessionId,
        username: &str,
        room: &str,
        sender: EventSender,
    ) -> Result<User, JoinError> {
        let username = username.trim();
        let room = room.trim();

        if username.is_empty() || room.is_empty() {
            return Err(JoinError::MissingCredentials);
        }

        if self.users.contains_key(&id) {
            return Err(JoinError::AlreadyJoined);
        }

        let username_key = username.to_lowercase();
        let room_key = room.to_lowercase();
        let taken = self.users.values().any(|registration| {
            registration.user.room.to_lowercase() == room_key
                && registration.user.username.to_lowercase() == username_key
        });
        if taken {
            return Err(JoinError::UsernameTaken);
        }

        let user = User {
            id,
            username: username.to_string(),
            room: room.to_string(),
        };
        self.users.insert(
            id,
            Registration {
                user: user.clone(),
                sender,
            },
        );

        Ok(user)
    }

    /// Delete the record for `id`, returning the removed user if one existed.
    pub fn remove_user(&mut self, id: &SessionId) -> Option<User> {
        self.users.remove(id).map(|registration| registration.user)
    }

    /// Look up the user registered for `id`.
    pub fn get_user(&self, id: &SessionId) -> Option<&User> {
        self.users.get(id).map(|registration| &registration.user)
    }

    /// All users whose room matches `room` case-insensitively.
    ///
    /// Sorted by lowercased username so repeated roster pushes are stable
    /// regardless of registration order.
    pub fn users_in_room(&self, room: &str) -> Vec<User> {
        let room_key = room.to_lowercase();
        let mut users: Vec<User> = self
            .users
            .values()
            .filter(|registration| registration.user.room.to_lowercase() == room_key)
            .map(|registration| registration.user.clone())
            .collect();

        users.sort_by_key(|user| user.username.to_lowercase());

        users
    }

    /// Broadcast targets for `room`: every occupant's session id and channel.
    pub fn subscribers(&self, room: &str) -> Vec<(SessionId, EventSender)> {
        let room_key = room.to_lowercase();
        self.users
            .values()
            .filter(|registration| registration.user.room.to_lowercase() == room_key)
            .map(|registration| (registration.user.id, registration.sender.clone()))
            .collect()
    }

    /// Distinct occupied room names, sorted case-insensitively.
    ///
    /// Display casing is taken from whichever occupant's record is seen for
    /// the room.
    pub fn room_names(&self) -> Vec<String> {
        let mut rooms = BTreeMap::new();
        for registration in self.users.values() {
            rooms
                .entry(registration.user.room.to_lowercase())
                .or_insert_with(|| registration.user.room.clone());
        }
        rooms.into_values().collect()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
