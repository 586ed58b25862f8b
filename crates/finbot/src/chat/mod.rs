//! Chat turns over HTTP: session bookkeeping around the financial interpreter.
//!
//! Session state lives behind [`SessionStore`] so the interpreter never sees
//! where or how conversations are kept.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{ChatRequest, ChatResponse, SessionId};
pub use repository::{SessionStore, SessionStoreError};
pub use router::chat_router;
pub use service::{ChatService, ChatServiceError};
