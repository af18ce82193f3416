// Marks destined ones as present in, or absent from, the current scene.
use crate::command::{Command, CommandScript};
use crate::error::StoreError;
use crate::labels::{DESTINED_ONES_PATH, NO, PRESENCE_FIELD, YES};
use crate::store::{StoreGateway, StoreScope, lookup};
use serde_json::Value;

// Reads a presence flag that may be stored as a boolean or as 是/否 text.
pub fn presence_flag(value: &Value, default: bool) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => match text.trim() {
            YES | "true" => true,
            NO | "false" => false,
            _ => default,
        },
        _ => default,
    }
}

pub async fn set_destined_one_presence<G: StoreGateway>(
    gateway: &G,
    scope: &StoreScope,
    name: &str,
    present: bool,
) -> Result<bool, StoreError> {
    // Names are single path segments; a dot would address a nested key instead.
    if name.is_empty() || name.contains('.') {
        log::warn!("Cannot address destined one '{name}' in the store");
        return Ok(false);
    }

    let snapshot = gateway.load(scope).await?;
    let entry = format!("{DESTINED_ONES_PATH}.{name}");
    if !lookup(&snapshot, &entry).is_some_and(Value::is_object) {
        log::warn!("No destined one named {name} in the {scope}");
        return Ok(false);
    }

    let path = format!("{entry}.{PRESENCE_FIELD}");
    let flag = if present { YES } else { NO };

    let mut script = CommandScript::new();
    script.push(Command::set(
        &path,
        Value::from(flag),
        format!("{name} 在场状态：{flag}"),
    ));

    match gateway.parse(&script.to_string(), &snapshot).await {
        Some(updated) => {
            gateway.persist(updated, scope).await?;
            log::info!("Presence of {name} set to {flag}");
            Ok(true)
        }
        None => {
            log::warn!("Could not update the presence of {name}");
            Ok(false)
        }
    }
}

// Flips the presence of a destined one; unreadable current values count as present.
pub async fn toggle_destined_one_presence<G: StoreGateway>(
    gateway: &G,
    scope: &StoreScope,
    name: &str,
    current: &Value,
) -> Result<bool, StoreError> {
    let present = presence_flag(current, true);
    set_destined_one_presence(gateway, scope, name, !present).await
}
