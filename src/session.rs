use std::collections::HashMap;
use std::sync::Arc;

use teloxide::types::ChatId;
use tokio::sync::Mutex;

use crate::db::Database;
use crate::location::ChatLocationProvider;
use crate::orchestrator::{LazyBackend, Orchestrator};

/// One orchestrator per chat, all sharing the same backend.
///
/// Sessions live for the life of the process. An entry is one small
/// `Arc`, and the bot serves a bounded set of chats.
#[derive(Clone)]
pub struct Sessions {
    db: Database,
    backend: Arc<LazyBackend>,
    chats: Arc<Mutex<HashMap<ChatId, Orchestrator>>>,
}

impl Sessions {
    pub fn new(db: Database, backend: Arc<LazyBackend>) -> Self {
        Self {
            db,
            backend,
            chats: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn orchestrator(&self, chat_id: ChatId) -> Orchestrator {
        let mut chats = self.chats.lock().await;
        if let Some(existing) = chats.get(&chat_id) {
            return existing.clone();
        }
        tracing::debug!(chat_id = chat_id.0, "Creating chat session");
        let orchestrator = Orchestrator::new(
            Arc::new(ChatLocationProvider::new(self.db.clone(), chat_id)),
            self.backend.clone(),
        );
        chats.insert(chat_id, orchestrator.clone());
        orchestrator
    }
}
