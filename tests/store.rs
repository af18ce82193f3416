// ../tests/store.rs
use destiny_export::error::ScriptError;
use destiny_export::labels::*;
use destiny_export::presence::{
    presence_flag, set_destined_one_presence, toggle_destined_one_presence,
};
use destiny_export::store::{lookup, parse_script, run_script};
use destiny_export::sync::ExistingEntries;
use destiny_export::*;
use serde_json::{Value, json};
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};

fn load_snapshot() -> Snapshot {
    let json_str = fs::read_to_string("tests/dummy_snapshot.json")
        .expect("Failed to read dummy snapshot JSON file");
    serde_json::from_str(&json_str).expect("Failed to parse snapshot JSON")
}

fn stale_store_snapshot() -> Value {
    json!({
        "命定系统": {
            "命运点数": 1,
            "命定之人": { "旧人": { "是否在场": "是" } }
        },
        "角色": {
            "技能列表": {
                "$meta": { "extensible": true },
                "旧技能": { "品质": "普通" }
            }
        },
        "货币": { "金币": 99, "银币": 1, "铜币": 7 },
        "背包": { "旧道具": { "数量": 2 } }
    })
}

async fn sync(store: &impl StoreGateway, snapshot: &Snapshot) -> SyncOutcome {
    write_character_to_store(
        store,
        &StoreScope::LatestMessage,
        &snapshot.character,
        &snapshot.items,
        &snapshot.skills,
        &snapshot.destined_ones,
    )
    .await
    .expect("Sync should not fail")
}

#[tokio::test]
async fn test_sync_replaces_stale_entries() {
    let store = MemoryStore::new();
    store
        .seed(StoreScope::LatestMessage, stale_store_snapshot())
        .await;
    let snapshot = load_snapshot();

    let outcome = sync(&store, &snapshot).await;
    assert_eq!(outcome, SyncOutcome::Applied { commands: 12 });

    let stored = store.snapshot(&StoreScope::LatestMessage).await;
    assert_eq!(stored["命定系统"]["命运点数"], 5);

    let skills = &stored["角色"]["技能列表"];
    assert!(skills.get("旧技能").is_none());
    assert!(skills.get("$meta").is_some());
    assert_eq!(skills["火球术"]["消耗"], "10 MP");
    assert!(skills.get("月影步").is_none());

    assert_eq!(stored["货币"], json!({ "金币": 20, "银币": 3, "铜币": 0 }));

    let inventory = stored["背包"].as_object().expect("inventory");
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory["治疗药水"]["数量"], 3);
    assert_eq!(inventory["治疗药水"]["品质"], "优秀");

    let ones = stored["命定系统"]["命定之人"]
        .as_object()
        .expect("destined ones");
    assert_eq!(ones.len(), 1);
    assert_eq!(ones["格雷"]["登神长阶"]["是否开启"], "否");
    assert_eq!(ones["格雷"]["技能"]["盾击"]["品质"], "普通");
}

#[tokio::test]
async fn test_sync_is_repeatable() {
    let store = MemoryStore::new();
    let snapshot = load_snapshot();

    assert!(sync(&store, &snapshot).await.is_applied());
    let first = store.snapshot(&StoreScope::LatestMessage).await;

    // The second pass deletes what the first inserted and ends up in the same place.
    let outcome = sync(&store, &snapshot).await;
    assert_eq!(outcome, SyncOutcome::Applied { commands: 12 });
    assert_eq!(store.snapshot(&StoreScope::LatestMessage).await, first);
}

#[test]
fn test_existing_entries_skip_meta() {
    let store = MemoryStore::new();
    let existing = ExistingEntries::read(&store, &stale_store_snapshot());
    assert_eq!(existing.skills, vec!["旧技能".to_string()]);
    assert_eq!(existing.items, vec!["旧道具".to_string()]);
    assert_eq!(existing.destined_ones, vec!["旧人".to_string()]);

    let empty = ExistingEntries::read(&store, &json!({ "背包": "not a mapping" }));
    assert_eq!(empty, ExistingEntries::default());
}

// Gateway that never accepts a script.
#[derive(Default)]
struct RejectingStore {
    inner: MemoryStore,
    persisted: AtomicBool,
}

impl StoreGateway for RejectingStore {
    async fn load(&self, scope: &StoreScope) -> Result<Value, StoreError> {
        self.inner.load(scope).await
    }

    async fn persist(&self, snapshot: Value, scope: &StoreScope) -> Result<(), StoreError> {
        self.persisted.store(true, Ordering::SeqCst);
        self.inner.persist(snapshot, scope).await
    }

    async fn parse(&self, _script: &str, _snapshot: &Value) -> Option<Value> {
        None
    }
}

#[tokio::test]
async fn test_rejected_script_writes_nothing() {
    let store = RejectingStore::default();
    store
        .inner
        .seed(StoreScope::LatestMessage, stale_store_snapshot())
        .await;

    let outcome = sync(&store, &load_snapshot()).await;
    assert_eq!(outcome, SyncOutcome::Rejected);
    assert!(!store.persisted.load(Ordering::SeqCst));
    assert_eq!(
        store.inner.snapshot(&StoreScope::LatestMessage).await,
        stale_store_snapshot()
    );
}

#[test]
fn test_rendered_script_parses_back() {
    let snapshot = load_snapshot();
    let existing = ExistingEntries {
        skills: vec!["Tom's \\ 剑".to_string()],
        ..Default::default()
    };
    let script = compile_commands(
        &snapshot.character,
        &snapshot.items,
        &snapshot.skills,
        &snapshot.destined_ones,
        &existing,
    );

    let parsed = parse_script(&script.to_string()).expect("Script should parse");
    assert_eq!(parsed, script.commands());
}

#[test]
fn test_malformed_script_is_rejected_whole() {
    let before = json!({ "货币": { "金币": 5 } });
    let script = "_.add('货币.金币', 10); // ok\n_.explode('货币'); // bad";
    assert!(matches!(
        parse_script(script),
        Err(ScriptError::Syntax { line: 2, .. })
    ));
    assert_eq!(run_script(script, &before), None);

    // A valid line that cannot be applied also discards the earlier ones.
    let script = "_.add('货币.金币', 10);\n_.add('货币', 1);";
    assert_eq!(run_script(script, &before), None);
}

#[test]
fn test_script_mutations() {
    let before = json!({ "背包": { "绳子": { "数量": 1 } } });
    let script = [
        "// header comment",
        "_.set('货币.金币', 0);",
        "_.add('货币.金币', 15); // 添加金币",
        "_.add('货币.银币', 2)",
        "_.insert('背包', '火把', {\"数量\": 3, \"描述\": \"(照明, 防身)\"});",
        "_.delete('背包', '绳子');",
        "_.delete('不存在', '任何');",
        "_.set('角色.称号', 'O\\'Neil');",
    ]
    .join("\n");

    let after = run_script(&script, &before).expect("Script should apply");
    assert_eq!(
        after,
        json!({
            "背包": { "火把": { "数量": 3, "描述": "(照明, 防身)" } },
            "货币": { "金币": 15, "银币": 2 },
            "角色": { "称号": "O'Neil" }
        })
    );
    assert_eq!(lookup(&after, "背包.火把.数量"), Some(&json!(3)));
    assert!(lookup(&after, "不存在").is_none());
}

#[tokio::test]
async fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = FileStore::new(dir.path().join("store"));
    let scope = StoreScope::Message(3);

    assert_eq!(store.load(&scope).await.expect("load"), json!({}));

    store
        .persist(stale_store_snapshot(), &scope)
        .await
        .expect("persist");
    assert!(store.path_for(&scope).ends_with("message_3.json"));
    assert_eq!(
        store.load(&scope).await.expect("load"),
        stale_store_snapshot()
    );
    assert_eq!(
        store
            .load(&StoreScope::LatestMessage)
            .await
            .expect("load latest"),
        json!({})
    );

    fs::write(store.path_for(&StoreScope::LatestMessage), "[1, 2]").expect("write");
    assert!(matches!(
        store.load(&StoreScope::LatestMessage).await,
        Err(StoreError::NotAMapping(_))
    ));
}

#[test]
fn test_presence_flag() {
    assert!(presence_flag(&json!(true), false));
    assert!(!presence_flag(&json!("否"), true));
    assert!(presence_flag(&json!("是"), false));
    assert!(!presence_flag(&json!("false"), true));
    assert!(presence_flag(&json!("也许"), true));
    assert!(!presence_flag(&Value::Null, false));
}

#[tokio::test]
async fn test_toggle_destined_one_presence() {
    let store = MemoryStore::new();
    store
        .seed(StoreScope::LatestMessage, stale_store_snapshot())
        .await;

    let updated =
        toggle_destined_one_presence(&store, &StoreScope::LatestMessage, "旧人", &json!("是"))
            .await
            .expect("toggle");
    assert!(updated);

    let stored = store.snapshot(&StoreScope::LatestMessage).await;
    assert_eq!(stored["命定系统"]["命定之人"]["旧人"][PRESENCE_FIELD], "否");

    let updated =
        toggle_destined_one_presence(&store, &StoreScope::LatestMessage, "旧人", &json!(false))
            .await
            .expect("toggle");
    assert!(updated);
    let stored = store.snapshot(&StoreScope::LatestMessage).await;
    assert_eq!(stored["命定系统"]["命定之人"]["旧人"][PRESENCE_FIELD], "是");
}

#[tokio::test]
async fn test_presence_of_unknown_destined_one_is_not_written() {
    let store = MemoryStore::new();
    store
        .seed(StoreScope::LatestMessage, stale_store_snapshot())
        .await;

    for name in ["不存在的人", "旧人.是否在场", ""] {
        let updated = set_destined_one_presence(&store, &StoreScope::LatestMessage, name, false)
            .await
            .expect("presence update");
        assert!(!updated, "{name:?} should not be updated");
    }
    assert_eq!(
        store.snapshot(&StoreScope::LatestMessage).await,
        stale_store_snapshot()
    );
}
