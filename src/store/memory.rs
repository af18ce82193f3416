use super::{StoreGateway, StoreScope, empty_snapshot};
use crate::error::StoreError;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::Mutex;

// In-process store, one snapshot per scope.
#[derive(Debug, Default)]
pub struct MemoryStore {
    scopes: Mutex<HashMap<StoreScope, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, scope: StoreScope, snapshot: Value) {
        self.scopes.lock().await.insert(scope, snapshot);
    }

    pub async fn snapshot(&self, scope: &StoreScope) -> Value {
        self.scopes
            .lock()
            .await
            .get(scope)
            .cloned()
            .unwrap_or_else(empty_snapshot)
    }
}

impl StoreGateway for MemoryStore {
    async fn load(&self, scope: &StoreScope) -> Result<Value, StoreError> {
        Ok(self.snapshot(scope).await)
    }

    async fn persist(&self, snapshot: Value, scope: &StoreScope) -> Result<(), StoreError> {
        self.seed(*scope, snapshot).await;
        Ok(())
    }
}
