//! In-memory session store. Each session keeps only its most recent
//! extraction result; nothing is persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::content::StructuredContent;

/// Oldest sessions are evicted beyond this many.
pub const MAX_SESSIONS: usize = 1024;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedContent {
    pub content: StructuredContent,
    pub generated_at: DateTime<Utc>,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, GeneratedContent>>>,
}

impl SessionStore {
    /// Stores `content` as the session's current content, replacing whatever
    /// was there. Only called after a successful extraction.
    pub async fn replace(&self, session_id: Uuid, content: StructuredContent) -> GeneratedContent {
        let entry = GeneratedContent {
            content,
            generated_at: Utc::now(),
        };

        let mut sessions = self.inner.write().await;
        if !sessions.contains_key(&session_id) && sessions.len() >= MAX_SESSIONS {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, e)| e.generated_at)
                .map(|(id, _)| *id);
            if let Some(id) = oldest {
                sessions.remove(&id);
                debug!(%id, "Evicted oldest session");
            }
        }
        sessions.insert(session_id, entry.clone());
        entry
    }

    pub async fn get(&self, session_id: Uuid) -> Option<GeneratedContent> {
        self.inner.read().await.get(&session_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
