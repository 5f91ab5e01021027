use std::{collections::BTreeSet, sync::Arc};

use tokio::sync::{Mutex, RwLock};

use crate::{recipient::RecipientId, storage::RegistryStorage};

/// Set of chats eligible for the promotional broadcast.
///
/// Shared by the update handlers (which register chats) and the broadcast
/// dispatcher (which removes unreachable ones). The lock is only held for a
/// single set operation, never across a send.
pub struct RecipientRegistry {
    recipients: RwLock<BTreeSet<RecipientId>>,
    storage: Arc<dyn RegistryStorage>,
    // Saves run one at a time, each with a snapshot taken after the previous save.
    persist_guard: Mutex<()>,
}

impl RecipientRegistry {
    pub async fn restore(storage: Arc<dyn RegistryStorage>) -> anyhow::Result<Self> {
        let recipients = storage.load().await?;
        log::info!("Restored registry with {} recipients", recipients.len());

        Ok(Self {
            recipients: RwLock::new(recipients),
            storage,
            persist_guard: Mutex::new(()),
        })
    }

    /// Returns `true` when the recipient was not registered before.
    pub async fn register(&self, recipient: RecipientId) -> bool {
        let inserted = self.recipients.write().await.insert(recipient);
        if inserted {
            log::info!("Registered new recipient {}", recipient);
            self.persist().await;
        }

        inserted
    }

    pub async fn remove(&self, recipient: RecipientId) -> bool {
        self.recipients.write().await.remove(&recipient)
    }

    #[cfg(test)]
    pub async fn contains(&self, recipient: RecipientId) -> bool {
        self.recipients.read().await.contains(&recipient)
    }

    pub async fn snapshot(&self) -> Vec<RecipientId> {
        self.recipients.read().await.iter().copied().collect()
    }

    pub async fn len(&self) -> usize {
        self.recipients.read().await.len()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.recipients.read().await.is_empty()
    }

    pub async fn persist(&self) {
        let _guard = self.persist_guard.lock().await;
        let recipients = self.recipients.read().await.clone();
        if let Err(error) = self.storage.save(&recipients).await {
            log::error!("Could not persist recipient registry. error = {}", error);
        }
    }
}
