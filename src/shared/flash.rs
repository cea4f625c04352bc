use serde::{Deserialize, Serialize};
use tower_sessions::Session;

const FLASH_KEY: &str = "flash.messages";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Success,
    Info,
    Warning,
    Danger,
}

/// One-shot message rendered into the next page and dropped from the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

pub async fn push(session: &Session, level: Level, message: impl Into<String>) {
    let mut messages: Vec<Flash> = session.get(FLASH_KEY).await.ok().flatten().unwrap_or_default();
    messages.push(Flash {
        level,
        message: message.into(),
    });
    if let Err(err) = session.insert(FLASH_KEY, messages).await {
        tracing::warn!("failed to save flash message: {err:?}");
    }
}

pub async fn take(session: &Session) -> Vec<Flash> {
    session.remove::<Vec<Flash>>(FLASH_KEY).await.ok().flatten().unwrap_or_default()
}
