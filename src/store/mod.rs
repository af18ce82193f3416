mod file;
mod interpreter;
mod memory;

pub use file::*;
pub use interpreter::*;
pub use memory::*;

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// Which chat message's variables a snapshot belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreScope {
    #[default]
    LatestMessage,
    Message(u32),
}

impl fmt::Display for StoreScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreScope::LatestMessage => write!(f, "latest message"),
            StoreScope::Message(id) => write!(f, "message {id}"),
        }
    }
}

// Host-side variable store. Commands only reach it through `parse`, which either
// yields a fully updated snapshot or nothing at all.
#[allow(async_fn_in_trait)]
pub trait StoreGateway {
    async fn load(&self, scope: &StoreScope) -> Result<Value, StoreError>;

    async fn persist(&self, snapshot: Value, scope: &StoreScope) -> Result<(), StoreError>;

    async fn parse(&self, script: &str, snapshot: &Value) -> Option<Value> {
        run_script(script, snapshot)
    }

    // Mapping stored at `address`; empty when unset or not a mapping.
    fn read(&self, snapshot: &Value, address: &str) -> Map<String, Value> {
        lookup(snapshot, address)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }
}

pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|segment| !segment.is_empty())
}

pub fn lookup<'a>(snapshot: &'a Value, path: &str) -> Option<&'a Value> {
    path_segments(path).try_fold(snapshot, |node, segment| node.get(segment))
}

pub fn empty_snapshot() -> Value {
    Value::Object(Map::new())
}
