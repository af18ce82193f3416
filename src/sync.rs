// Compiles the preset part of a snapshot into store commands and applies them.
use crate::character::{CharacterConfig, DestinedOne, Equipment, Item, Skill, presets};
use crate::command::{Command, CommandScript};
use crate::currency::parse_currency;
use crate::error::StoreError;
use crate::labels::*;
use crate::store::{StoreGateway, StoreScope};
use serde_json::{Map, Value, json};

// Keys already present in the store's synced collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExistingEntries {
    pub skills: Vec<String>,
    pub items: Vec<String>,
    pub destined_ones: Vec<String>,
}

impl ExistingEntries {
    pub fn read<G: StoreGateway>(gateway: &G, snapshot: &Value) -> Self {
        let keys = |address: &str| -> Vec<String> {
            gateway
                .read(snapshot, address)
                .keys()
                .filter(|key| key.as_str() != META_KEY)
                .cloned()
                .collect()
        };
        ExistingEntries {
            skills: keys(SKILL_LIST_PATH),
            items: keys(INVENTORY_PATH),
            destined_ones: keys(DESTINED_ONES_PATH),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Applied { commands: usize },
    // The gateway could not parse the script; nothing was written.
    Rejected,
}

impl SyncOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, SyncOutcome::Applied { .. })
    }
}

pub fn skill_record(skill: &Skill) -> Value {
    json!({
        "品质": skill.rarity.label(),
        "类型": skill.kind,
        "消耗": skill.consume,
        "标签": skill.tag,
        "效果": skill.effect,
        "描述": skill.description,
    })
}

pub fn item_record(item: &Item) -> Value {
    json!({
        "品质": item.rarity.label(),
        "数量": item.quantity.max(1),
        "类型": item.category,
        "标签": item.tag,
        "效果": item.effect,
        "描述": item.description,
    })
}

fn equipment_record(equipment: &Equipment) -> Value {
    json!({
        "品质": equipment.rarity.label(),
        "类型": equipment.kind,
        "标签": equipment.tag,
        "效果": equipment.effect,
        "描述": equipment.description,
    })
}

fn yes_no(flag: bool) -> &'static str {
    if flag { YES } else { NO }
}

pub fn destined_one_record(one: &DestinedOne) -> Value {
    let equipment: Map<String, Value> = one
        .equip
        .iter()
        .filter(|equipment| !equipment.name.is_empty())
        .map(|equipment| (equipment.name.clone(), equipment_record(equipment)))
        .collect();
    let skills: Map<String, Value> = one
        .skills
        .iter()
        .map(|skill| (skill.name.clone(), skill_record(skill)))
        .collect();

    json!({
        "是否在场": YES,
        "生命层级": one.life_level,
        "等级": one.level,
        "种族": one.race,
        "身份": one.identity,
        "职业": one.career,
        "性格": one.personality,
        "喜爱": one.like,
        "外貌特质": one.app,
        "衣物装饰": one.cloth,
        "属性": {
            "力量": one.attributes.strength,
            "敏捷": one.attributes.dexterity,
            "体质": one.attributes.constitution,
            "智力": one.attributes.intelligence,
            "精神": one.attributes.mind,
        },
        "登神长阶": {
            "是否开启": yes_no(one.stairway.is_open),
        },
        "是否缔结契约": one.is_contract,
        "好感度": one.affinity,
        "评价": one.comment,
        "背景故事": one.background_info,
        "装备": equipment,
        "技能": skills,
    })
}

// Every key already in a collection is deleted before anything is inserted, so
// entries dropped from the snapshot never survive a sync.
fn delete_existing(script: &mut CommandScript, path: &str, keys: &[String], what: &str) {
    script.extend(
        keys.iter()
            .map(|key| Command::delete(path, key, format!("删除旧{what}：{key}"))),
    );
}

pub fn compile_commands(
    character: &CharacterConfig,
    items: &[Item],
    skills: &[Skill],
    destined_ones: &[DestinedOne],
    existing: &ExistingEntries,
) -> CommandScript {
    let mut script = CommandScript::new();

    script.push(Command::set(
        DESTINY_POINTS_PATH,
        Value::from(character.destiny_points),
        "初始化命运点数",
    ));

    delete_existing(&mut script, SKILL_LIST_PATH, &existing.skills, "技能");
    for skill in presets(skills) {
        script.push(Command::insert(
            SKILL_LIST_PATH,
            &skill.name,
            skill_record(skill),
            format!("添加技能：{}", skill.name),
        ));
    }

    // Currency is owned by this pass: reset, then add what the currency items carry.
    script.push(Command::set(GOLD_PATH, Value::from(0), "初始化金币"));
    script.push(Command::set(SILVER_PATH, Value::from(0), "初始化银币"));
    script.push(Command::set(COPPER_PATH, Value::from(0), "初始化铜币"));

    delete_existing(&mut script, INVENTORY_PATH, &existing.items, "道具");
    for item in presets(items) {
        if item.category == CURRENCY_CATEGORY {
            let currency = parse_currency(&item.description);
            let amounts = [
                (GOLD_PATH, currency.gold, "添加金币"),
                (SILVER_PATH, currency.silver, "添加银币"),
                (COPPER_PATH, currency.copper, "添加铜币"),
            ];
            for (path, amount, note) in amounts {
                if amount > 0 {
                    let amount = i64::try_from(amount).unwrap_or(i64::MAX);
                    script.push(Command::add(path, amount, note));
                }
            }
        } else {
            script.push(Command::insert(
                INVENTORY_PATH,
                &item.name,
                item_record(item),
                format!("添加道具：{}", item.name),
            ));
        }
    }

    delete_existing(
        &mut script,
        DESTINED_ONES_PATH,
        &existing.destined_ones,
        "命定之人",
    );
    for one in presets(destined_ones) {
        script.push(Command::insert(
            DESTINED_ONES_PATH,
            &one.name,
            destined_one_record(one),
            format!("添加命定之人：{}", one.name),
        ));
    }

    script
}

// Brings the store's synced collections in line with the snapshot's preset entries.
// A script the gateway cannot parse leaves the store untouched and is reported as
// `SyncOutcome::Rejected`.
pub async fn write_character_to_store<G: StoreGateway>(
    gateway: &G,
    scope: &StoreScope,
    character: &CharacterConfig,
    items: &[Item],
    skills: &[Skill],
    destined_ones: &[DestinedOne],
) -> Result<SyncOutcome, StoreError> {
    let snapshot = gateway.load(scope).await?;
    let existing = ExistingEntries::read(gateway, &snapshot);
    let script = compile_commands(character, items, skills, destined_ones, &existing);
    log::debug!("Compiled {} store commands for {scope}", script.len());

    match gateway.parse(&script.to_string(), &snapshot).await {
        Some(updated) => {
            gateway.persist(updated, scope).await?;
            log::info!("Preset data written to the variables of the {scope}");
            Ok(SyncOutcome::Applied {
                commands: script.len(),
            })
        }
        None => {
            log::warn!("Store rejected the command script; nothing was written");
            Ok(SyncOutcome::Rejected)
        }
    }
}
