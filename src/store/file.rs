use super::{StoreGateway, StoreScope, empty_snapshot};
use crate::error::StoreError;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const STORE_DIR: &str = "./data/store";

// Keeps each scope's variables in its own JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(STORE_DIR)
    }
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, scope: &StoreScope) -> PathBuf {
        let file_name = match scope {
            StoreScope::LatestMessage => "latest.json".to_string(),
            StoreScope::Message(id) => format!("message_{id}.json"),
        };
        self.dir.join(file_name)
    }
}

impl StoreGateway for FileStore {
    async fn load(&self, scope: &StoreScope) -> Result<Value, StoreError> {
        let path = self.path_for(scope);
        if !tokio::fs::try_exists(&path).await? {
            log::debug!("No variables stored for {scope} yet");
            return Ok(empty_snapshot());
        }

        let data = tokio::fs::read_to_string(&path).await?;
        let snapshot: Value = serde_json::from_str(&data)?;
        if !snapshot.is_object() {
            return Err(StoreError::NotAMapping(path.display().to_string()));
        }
        Ok(snapshot)
    }

    async fn persist(&self, snapshot: Value, scope: &StoreScope) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(scope);
        let serialized = serde_json::to_string_pretty(&snapshot)?;
        tokio::fs::write(&path, serialized).await?;
        log::debug!("Persisted variables for {scope} to {}", path.display());
        Ok(())
    }
}
