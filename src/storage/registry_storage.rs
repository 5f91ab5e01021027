use std::{
    collections::BTreeSet,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use thiserror::Error;
use tokio::{fs, sync::RwLock};

use crate::recipient::RecipientId;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not access registry file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait RegistryStorage: Send + Sync {
    async fn load(&self) -> Result<BTreeSet<RecipientId>, StorageError>;
    async fn save(&self, recipients: &BTreeSet<RecipientId>) -> Result<(), StorageError>;
}

/// Keeps the registry as a JSON array of chat ids.
///
/// A missing or empty file loads as an empty registry. A file that cannot be
/// decoded is copied next to itself with a `.backup` suffix and the registry
/// starts empty, so a corrupted file never prevents the bot from starting.
pub struct JsonFileRegistryStorage {
    path: PathBuf,
}

impl JsonFileRegistryStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".backup");
        PathBuf::from(name)
    }

    async fn backup_corrupted_file(&self) {
        let backup_path = self.backup_path();
        match fs::copy(&self.path, &backup_path).await {
            Ok(_) => log::info!(
                "Copied undecodable registry file to {}",
                backup_path.display()
            ),
            Err(error) => log::error!(
                "Could not back up undecodable registry file. error = {}",
                error
            ),
        }
    }
}

#[async_trait]
impl RegistryStorage for JsonFileRegistryStorage {
    async fn load(&self) -> Result<BTreeSet<RecipientId>, StorageError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                log::info!(
                    "Registry file {} not found, starting with an empty registry",
                    self.path.display()
                );
                return Ok(BTreeSet::new());
            }
            Err(error) => return Err(self.io_error(error)),
        };

        if content.trim().is_empty() {
            return Ok(BTreeSet::new());
        }

        match serde_json::from_str(&content) {
            Ok(recipients) => Ok(recipients),
            Err(error) => {
                log::error!(
                    "Could not decode registry file {}. error = {}",
                    self.path.display(),
                    error
                );
                self.backup_corrupted_file().await;
                Ok(BTreeSet::new())
            }
        }
    }

    async fn save(&self, recipients: &BTreeSet<RecipientId>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(recipients)?;

        let mut tmp_path = self.path.as_os_str().to_owned();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        fs::write(&tmp_path, json)
            .await
            .map_err(|error| self.io_error(error))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|error| self.io_error(error))?;

        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRegistryStorage {
    store: RwLock<BTreeSet<RecipientId>>,
}

impl InMemoryRegistryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipients(recipients: impl IntoIterator<Item = RecipientId>) -> Self {
        Self {
            store: RwLock::new(recipients.into_iter().collect()),
        }
    }
}

#[async_trait]
impl RegistryStorage for InMemoryRegistryStorage {
    async fn load(&self) -> Result<BTreeSet<RecipientId>, StorageError> {
        Ok(self.store.read().await.clone())
    }

    async fn save(&self, recipients: &BTreeSet<RecipientId>) -> Result<(), StorageError> {
        *self.store.write().await = recipients.clone();
        Ok(())
    }
}
