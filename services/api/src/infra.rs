use finbot::analytics::{Dataset, FinancialInterpreter, SessionState};
use finbot::chat::{ChatService, SessionId, SessionStore, SessionStoreError};
use finbot::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use crate::chart::SvgTrendRenderer;

pub(crate) type AppChatService = ChatService<InMemorySessionStore, SvgTrendRenderer>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) dataset: Arc<Dataset>,
}

/// Process-local sessions keyed by sequential ids ("1", "2", ...).
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionStore {
    inner: Arc<Mutex<SessionTable>>,
}

#[derive(Default)]
struct SessionTable {
    sessions: HashMap<SessionId, SessionState>,
    issued: u64,
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, id: &SessionId) -> Result<Option<SessionState>, SessionStoreError> {
        let guard = self.inner.lock().expect("session mutex poisoned");
        Ok(guard.sessions.get(id).cloned())
    }

    fn put(&self, id: &SessionId, state: SessionState) -> Result<(), SessionStoreError> {
        let mut guard = self.inner.lock().expect("session mutex poisoned");
        guard.sessions.insert(id.clone(), state);
        Ok(())
    }

    fn next_id(&self) -> Result<SessionId, SessionStoreError> {
        let mut guard = self.inner.lock().expect("session mutex poisoned");
        loop {
            guard.issued += 1;
            let candidate = SessionId(guard.issued.to_string());
            if !guard.sessions.contains_key(&candidate) {
                return Ok(candidate);
            }
        }
    }
}

pub(crate) fn load_dataset(path: &Path) -> Result<Arc<Dataset>, AppError> {
    Ok(Arc::new(Dataset::from_path(path)?))
}

pub(crate) fn build_interpreter(
    dataset: Arc<Dataset>,
    plots_dir: &Path,
) -> FinancialInterpreter<SvgTrendRenderer> {
    let renderer = Arc::new(SvgTrendRenderer::new(plots_dir));
    FinancialInterpreter::new(dataset, renderer)
}

pub(crate) fn build_chat_service(dataset: Arc<Dataset>, plots_dir: &Path) -> Arc<AppChatService> {
    let interpreter = Arc::new(build_interpreter(dataset, plots_dir));
    Arc::new(ChatService::new(
        Arc::new(InMemorySessionStore::default()),
        interpreter,
    ))
}
