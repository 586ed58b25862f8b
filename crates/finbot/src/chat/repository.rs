use super::domain::SessionId;
use crate::analytics::SessionState;

/// Storage abstraction for per-session conversation state.
pub trait SessionStore: Send + Sync {
    fn get(&self, id: &SessionId) -> Result<Option<SessionState>, SessionStoreError>;
    fn put(&self, id: &SessionId, state: SessionState) -> Result<(), SessionStoreError>;
    /// Allocates an id no existing session uses.
    fn next_id(&self) -> Result<SessionId, SessionStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
