//! Shared server state.

use tokio::sync::Mutex;

use crate::{filter::WordFilter, registry::RoomRegistry};

/// Shared application state, constructed by the caller and handed to the
/// gateway at startup. There is no ambient singleton; tests build their own.
pub struct AppState {
    /// Registry of joined sessions; the single lock makes each handler's
    /// read-modify-broadcast sequence atomic
    pub registry: Mutex<RoomRegistry>,
    /// Content filter applied to outgoing chat text
    pub filter: WordFilter,
}

impl AppState {
    pub fn new(registry: RoomRegistry, filter: WordFilter) -> Self {
        Self {
            registry: Mutex::new(registry),
            filter,
        }
    }
}
