// Renders a snapshot as the YAML character brief the model starts the story from.
use crate::character::{
    Attributes, Background, CharacterConfig, DestinedOne, Equipment, Item, Skill, Snapshot,
    customs,
};
use crate::labels::{PROMPT_INSTRUCTIONS, UNNAMED};
use crate::tiers::{BASE_STAT, TierResolver, format_attribute};
use serde_json::{Map, Value};

// Ordered mapping that only takes a key when its inclusion rule holds.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn field_if(self, include: bool, key: &str, value: impl Into<Value>) -> Self {
        if include { self.field(key, value) } else { self }
    }

    // Kept only when the text is non-empty.
    pub fn text(self, key: &str, value: &str) -> Self {
        self.field_if(!value.is_empty(), key, value)
    }

    // Kept only when the list has entries.
    pub fn list(self, key: &str, values: Vec<Value>) -> Self {
        self.field_if(!values.is_empty(), key, values)
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.build()
    }
}

fn name_or_placeholder(name: &str) -> &str {
    if name.is_empty() { UNNAMED } else { name }
}

fn basic_info(character: &CharacterConfig, tiers: &impl TierResolver) -> Record {
    Record::new()
        .field("姓名", character.name.as_str())
        .field("性别", character.display_gender())
        .field("年龄", format!("{} 岁", character.age))
        .field("种族", character.display_race())
        .field("身份", character.display_identity())
        .field("出生地", character.display_location())
        .field("生命层级", tiers.tier_name(character.level))
        .field("等级", format!("Lv.{}", character.level))
}

fn character_attributes(character: &CharacterConfig, tiers: &impl TierResolver) -> Record {
    let bonus = tiers.tier_bonus(character.level);
    let points = &character.attribute_points;
    let attribute = |extra: i64| format_attribute(BASE_STAT, bonus, extra);

    Record::new()
        .field("力量", attribute(points.strength))
        .field("敏捷", attribute(points.dexterity))
        .field("体质", attribute(points.constitution))
        .field("智力", attribute(points.intelligence))
        .field("精神", attribute(points.mind))
}

pub fn equipment_entry(equipment: &Equipment) -> Value {
    Record::new()
        .field("名称", equipment.name.as_str())
        .field("类型", equipment.kind.as_str())
        .field("品质", equipment.rarity.label())
        .text("标签", &equipment.tag)
        .field("效果", equipment.effect.as_str())
        .text("描述", &equipment.description)
        .build()
}

pub fn custom_item_entry(item: &Item) -> Value {
    Record::new()
        .field("名称", name_or_placeholder(&item.name))
        .text("类型", &item.category)
        .field("品质", item.rarity.label())
        .field_if(item.quantity != 0, "数量", item.quantity)
        .text("标签", &item.tag)
        .text("效果", &item.effect)
        .text("描述", &item.description)
        .build()
}

pub fn custom_skill_entry(skill: &Skill) -> Value {
    Record::new()
        .field("名称", name_or_placeholder(&skill.name))
        .text("类型", &skill.kind)
        .field("品质", skill.rarity.label())
        .text("标签", &skill.tag)
        .text("消耗", &skill.consume)
        .text("效果", &skill.effect)
        .text("描述", &skill.description)
        .build()
}

fn attribute_values(attributes: &Attributes) -> Record {
    Record::new()
        .field("力量", attributes.strength)
        .field("敏捷", attributes.dexterity)
        .field("体质", attributes.constitution)
        .field("智力", attributes.intelligence)
        .field("精神", attributes.mind)
}

pub fn destined_one_entry(one: &DestinedOne) -> Value {
    let equipment = one
        .equip
        .iter()
        .filter(|equipment| !equipment.name.is_empty())
        .map(|equipment| {
            Record::new()
                .field("名称", equipment.name.as_str())
                .text("描述", &equipment.description)
                .build()
        })
        .collect();

    let stairway = one.stairway.is_open.then(|| {
        Record::new()
            .field("状态", "已开启")
            .text("描述", one.stairway.description().unwrap_or_default())
    });

    let skills = one
        .skills
        .iter()
        .map(|skill| {
            Record::new()
                .field("名称", skill.name.as_str())
                .field("效果", skill.effect.as_str())
                .build()
        })
        .collect();

    let mut record = Record::new()
        .field("名称", one.name.as_str())
        .field("种族", one.race.as_str())
        .field("身份", one.identity.join("、"))
        .field_if(!one.career.is_empty(), "职业", one.career.join("、"))
        .field("生命层级", one.life_level.as_str())
        .field("等级", one.level)
        .field("性格", one.personality.as_str())
        .field("喜爱", one.like.as_str())
        .field("外貌", one.app.as_str())
        .field("衣着", one.cloth.as_str())
        .field("属性", attribute_values(&one.attributes))
        .field("是否缔结契约", one.is_contract)
        .field("好感度", one.affinity)
        .list("装备", equipment);
    if let Some(stairway) = stairway {
        record = record.field("登神长阶", stairway);
    }
    record
        .text("评价", &one.comment)
        .text("背景", &one.background_info)
        .list("技能", skills)
        .build()
}

pub fn background_entry(background: &Background) -> Value {
    Record::new()
        .field("名称", background.name.as_str())
        .text("种族限制", &background.required_race)
        .text("地点限制", &background.required_location)
        .field("描述", background.description.as_str())
        .build()
}

// Builds the mapping shown to the model. Preset and custom entries alike may appear
// here; custom ones get their own sections.
pub fn build_prompt_document(snapshot: &Snapshot, tiers: &impl TierResolver) -> Value {
    let character = &snapshot.character;

    let info = Record::new()
        .field("基本信息", basic_info(character, tiers))
        .field("角色属性", character_attributes(character, tiers))
        .list(
            "装备列表",
            snapshot.equipments.iter().map(equipment_entry).collect(),
        )
        .list(
            "自定义道具列表",
            customs(&snapshot.items).map(custom_item_entry).collect(),
        )
        .list(
            "自定义技能列表",
            customs(&snapshot.skills).map(custom_skill_entry).collect(),
        )
        .list(
            "命定之人",
            customs(&snapshot.destined_ones)
                .map(destined_one_entry)
                .collect(),
        );

    let mut document = Record::new().field("角色信息", info);
    if let Some(background) = &snapshot.background {
        document = document.field("初始开局剧情", background_entry(background));
    }
    document.build()
}

pub fn render_yaml(document: &Value) -> String {
    match serde_yaml::to_string(document) {
        Ok(yaml) => yaml,
        Err(e) => {
            // JSON is valid YAML, so the model still gets a readable block.
            log::error!("Failed to render prompt document as YAML: {e}");
            format!("{document:#}\n")
        }
    }
}

// The fenced YAML document followed by the fixed generation instructions.
pub fn generate_ai_prompt(snapshot: &Snapshot, tiers: &impl TierResolver) -> String {
    let mut yaml = render_yaml(&build_prompt_document(snapshot, tiers));
    if !yaml.ends_with('\n') {
        yaml.push('\n');
    }
    format!("```yaml\n{yaml}```\n\n{}", PROMPT_INSTRUCTIONS.join("\n"))
}
