use std::sync::Arc;

use tracing::info;

use super::domain::{ChatRequest, ChatResponse};
use super::repository::{SessionStore, SessionStoreError};
use crate::analytics::{FinancialInterpreter, Reply, TrendRenderer};

/// Runs one chat turn: resolve the session, interpret, persist the session.
pub struct ChatService<S, T> {
    sessions: Arc<S>,
    interpreter: Arc<FinancialInterpreter<T>>,
}

impl<S, T> ChatService<S, T>
where
    S: SessionStore + 'static,
    T: TrendRenderer + 'static,
{
    pub fn new(sessions: Arc<S>, interpreter: Arc<FinancialInterpreter<T>>) -> Self {
        Self {
            sessions,
            interpreter,
        }
    }

    pub fn interpreter(&self) -> &FinancialInterpreter<T> {
        &self.interpreter
    }

    pub fn respond(&self, request: ChatRequest) -> Result<ChatResponse, ChatServiceError> {
        let ChatRequest {
            message,
            session_id,
        } = request;

        let session_id = match session_id.filter(|id| !id.is_blank()) {
            Some(id) => id,
            None => self.sessions.next_id()?,
        };
        let state = self.sessions.get(&session_id)?.unwrap_or_default();

        let Reply {
            text,
            image,
            session,
            intent,
        } = self.interpreter.interpret(&message, state);

        self.sessions.put(&session_id, session)?;
        info!(%session_id, intent = intent.label(), "chat turn answered");

        Ok(ChatResponse {
            session_id,
            reply: text,
            image,
            intent,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatServiceError {
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}
