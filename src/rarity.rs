use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

pub const DEFAULT_RARITY_LABEL: &str = "普通";

// Item, skill and equipment quality as the creation forms send it.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
#[strum(serialize_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
    // Anything the forms send that we do not know about.
    Unknown,
}

impl Rarity {
    // Localized display label written to the store and shown to the model.
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "普通",
            Rarity::Uncommon => "优秀",
            Rarity::Rare => "稀有",
            Rarity::Epic => "史诗",
            Rarity::Legendary => "传说",
            Rarity::Mythic => "神话",
            Rarity::Unknown => DEFAULT_RARITY_LABEL,
        }
    }
}

// A `null` rarity is the default one; unrecognised text is `Unknown`.
impl From<Option<String>> for Rarity {
    fn from(raw: Option<String>) -> Self {
        match raw {
            Some(raw) => raw.trim().parse().unwrap_or(Rarity::Unknown),
            None => Rarity::default(),
        }
    }
}
