use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;

use crate::analytics::{
    Dataset, FinancialInterpreter, FinancialRecord, RenderError, SessionState, TrendRenderer,
    TrendSeries,
};
use crate::chat::domain::SessionId;
use crate::chat::repository::{SessionStore, SessionStoreError};
use crate::chat::{chat_router, ChatService};

pub(super) fn dataset() -> Arc<Dataset> {
    let rows = [
        ("Apple", 2023, 383285.0, 96995.0),
        ("Microsoft", 2023, 211915.0, 72361.0),
        ("Microsoft", 2024, 245122.0, 88136.0),
        ("Tesla", 2022, 81462.0, 12556.0),
        ("Tesla", 2023, 96773.0, 14997.0),
    ];

    Arc::new(Dataset::from_records(
        rows.into_iter()
            .map(|(company, year, revenue, income)| FinancialRecord {
                company: company.to_string(),
                year: Some(year),
                total_revenue: Some(revenue),
                net_income: Some(income),
                total_assets: None,
                total_liabilities: None,
                operating_cash_flow: None,
            })
            .collect(),
    ))
}

#[derive(Default)]
pub(super) struct StaticRenderer;

impl TrendRenderer for StaticRenderer {
    fn render(&self, _series: &TrendSeries, file_stem: &str) -> Result<String, RenderError> {
        Ok(format!("/static/plots/{file_stem}.svg"))
    }
}

#[derive(Default)]
pub(super) struct MemorySessions {
    pub(super) sessions: Mutex<HashMap<SessionId, SessionState>>,
}

impl SessionStore for MemorySessions {
    fn get(&self, id: &SessionId) -> Result<Option<SessionState>, SessionStoreError> {
        Ok(self
            .sessions
            .lock()
            .expect("session mutex poisoned")
            .get(id)
            .cloned())
    }

    fn put(&self, id: &SessionId, state: SessionState) -> Result<(), SessionStoreError> {
        self.sessions
            .lock()
            .expect("session mutex poisoned")
            .insert(id.clone(), state);
        Ok(())
    }

    fn next_id(&self) -> Result<SessionId, SessionStoreError> {
        let guard = self.sessions.lock().expect("session mutex poisoned");
        Ok(SessionId((guard.len() + 1).to_string()))
    }
}

pub(super) struct UnavailableSessions;

impl SessionStore for UnavailableSessions {
    fn get(&self, _id: &SessionId) -> Result<Option<SessionState>, SessionStoreError> {
        Err(SessionStoreError::Unavailable("offline".to_string()))
    }

    fn put(&self, _id: &SessionId, _state: SessionState) -> Result<(), SessionStoreError> {
        Err(SessionStoreError::Unavailable("offline".to_string()))
    }

    fn next_id(&self) -> Result<SessionId, SessionStoreError> {
        Err(SessionStoreError::Unavailable("offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    Arc<ChatService<MemorySessions, StaticRenderer>>,
    Arc<MemorySessions>,
) {
    let sessions = Arc::new(MemorySessions::default());
    let interpreter = Arc::new(FinancialInterpreter::new(
        dataset(),
        Arc::new(StaticRenderer),
    ));
    let service = Arc::new(ChatService::new(sessions.clone(), interpreter));
    (service, sessions)
}

pub(super) fn router() -> (Router, Arc<MemorySessions>) {
    let (service, sessions) = build_service();
    (chat_router(service), sessions)
}
