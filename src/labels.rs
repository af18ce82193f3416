// region:  --- Store addresses

pub const DESTINY_POINTS_PATH: &str = "命定系统.命运点数";
pub const SKILL_LIST_PATH: &str = "角色.技能列表";
pub const INVENTORY_PATH: &str = "背包";
pub const DESTINED_ONES_PATH: &str = "命定系统.命定之人";

pub const GOLD_PATH: &str = "货币.金币";
pub const SILVER_PATH: &str = "货币.银币";
pub const COPPER_PATH: &str = "货币.铜币";

// Field of a destined one entry that marks whether it is in the current scene.
pub const PRESENCE_FIELD: &str = "是否在场";

// endregion:  --- Store addresses

// region:  --- Reserved values

pub const CURRENCY_CATEGORY: &str = "货币";
pub const CUSTOM_SENTINEL: &str = "自定义";
pub const UNNAMED: &str = "未命名";
pub const META_KEY: &str = "$meta";

pub const YES: &str = "是";
pub const NO: &str = "否";

// endregion:  --- Reserved values

// region:  --- Prompt instructions

pub const PROMPT_INSTRUCTIONS: [&str; 4] = [
    "---",
    "根据<status_current_variables>和以上内容，生成一个符合描述和情景的初始剧情！",
    "（注意：生成初始剧情时，先检查上述内容是否完整，如不完整，必须参考相关设定进行完善，然后再根据内容，在<UpdateVariable>内更新数据。除非有特殊要求，更新的数据不要有任何修改和省略。）",
    "（IMPORTANT: 已在<status_current_variables>内的数据，不得修改和删除）",
];

// endregion:  --- Prompt instructions
