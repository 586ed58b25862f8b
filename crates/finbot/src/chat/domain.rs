use crate::analytics::IntentKind;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inbound chat message; a missing or blank `session_id` starts a new session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "session_id_from_text_or_number")]
    pub session_id: Option<SessionId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: SessionId,
    pub reply: String,
    pub image: Option<String>,
    pub intent: IntentKind,
}

/// Clients echo back whatever id they were handed, sometimes as a JSON number.
fn session_id_from_text_or_number<'de, D>(deserializer: D) -> Result<Option<SessionId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSessionId {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    let raw = Option::<RawSessionId>::deserialize(deserializer)?;
    Ok(raw.map(|raw| match raw {
        RawSessionId::Text(text) => SessionId(text),
        RawSessionId::Unsigned(number) => SessionId(number.to_string()),
        RawSessionId::Signed(number) => SessionId(number.to_string()),
    }))
}
