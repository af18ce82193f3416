// Snapshot data handed over by the character creation forms.
use crate::error::AppError;
use crate::labels::CUSTOM_SENTINEL;
use crate::rarity::Rarity;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

fn default_quantity() -> u32 {
    1
}

// The forms send `null` for fields the player left blank; read it like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_else(default_quantity))
}

// Extra points the player spent on each of the five attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributePoints {
    #[serde(rename = "力量", default)]
    pub strength: i64,
    #[serde(rename = "敏捷", default)]
    pub dexterity: i64,
    #[serde(rename = "体质", default)]
    pub constitution: i64,
    #[serde(rename = "智力", default)]
    pub intelligence: i64,
    #[serde(rename = "精神", default)]
    pub mind: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterConfig {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub gender: String,
    #[serde(deserialize_with = "nullable")]
    pub custom_gender: String,
    #[serde(deserialize_with = "nullable")]
    pub age: u32,
    #[serde(deserialize_with = "nullable")]
    pub race: String,
    #[serde(deserialize_with = "nullable")]
    pub custom_race: String,
    #[serde(deserialize_with = "nullable")]
    pub identity: String,
    #[serde(deserialize_with = "nullable")]
    pub custom_identity: String,
    #[serde(deserialize_with = "nullable")]
    pub start_location: String,
    #[serde(deserialize_with = "nullable")]
    pub custom_start_location: String,
    #[serde(deserialize_with = "nullable")]
    pub level: u32,
    #[serde(deserialize_with = "nullable")]
    pub attribute_points: AttributePoints,
    #[serde(deserialize_with = "nullable")]
    pub destiny_points: i64,
}

// Picks the free-text override when the categorical value is the custom sentinel.
fn resolve<'a>(value: &'a str, custom: &'a str) -> &'a str {
    if value == CUSTOM_SENTINEL { custom } else { value }
}

impl CharacterConfig {
    pub fn display_gender(&self) -> &str {
        resolve(&self.gender, &self.custom_gender)
    }

    pub fn display_race(&self) -> &str {
        resolve(&self.race, &self.custom_race)
    }

    pub fn display_identity(&self) -> &str {
        resolve(&self.identity, &self.custom_identity)
    }

    pub fn display_location(&self) -> &str {
        resolve(&self.start_location, &self.custom_start_location)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    // Category tag; the reserved "货币" category carries currency in its description.
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub category: String,
    pub rarity: Rarity,
    #[serde(deserialize_with = "nullable_quantity")]
    pub quantity: u32,
    #[serde(deserialize_with = "nullable")]
    pub tag: String,
    #[serde(deserialize_with = "nullable")]
    pub effect: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub is_custom: bool,
}

impl Default for Item {
    fn default() -> Self {
        Item {
            name: String::new(),
            category: String::new(),
            rarity: Rarity::default(),
            quantity: default_quantity(),
            tag: String::new(),
            effect: String::new(),
            description: String::new(),
            is_custom: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    pub rarity: Rarity,
    #[serde(deserialize_with = "nullable")]
    pub consume: String,
    #[serde(deserialize_with = "nullable")]
    pub tag: String,
    #[serde(deserialize_with = "nullable")]
    pub effect: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub is_custom: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Equipment {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    pub rarity: Rarity,
    #[serde(deserialize_with = "nullable")]
    pub tag: String,
    #[serde(deserialize_with = "nullable")]
    pub effect: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub is_custom: bool,
}

// Fixed five-attribute record of a destined one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    pub strength: i64,
    pub dexterity: i64,
    pub constitution: i64,
    pub intelligence: i64,
    pub mind: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stairway {
    #[serde(deserialize_with = "nullable")]
    pub is_open: bool,
    pub elements: Option<BTreeMap<String, String>>,
}

impl Stairway {
    pub fn description(&self) -> Option<&str> {
        self.elements
            .as_ref()
            .and_then(|elements| elements.get("描述").or_else(|| elements.get("description")))
            .map(String::as_str)
            .filter(|description| !description.is_empty())
    }
}

// A companion bound to the protagonist by fate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DestinedOne {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub race: String,
    #[serde(deserialize_with = "nullable")]
    pub identity: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub career: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub level: u32,
    #[serde(deserialize_with = "nullable")]
    pub life_level: String,
    #[serde(deserialize_with = "nullable")]
    pub personality: String,
    #[serde(deserialize_with = "nullable")]
    pub like: String,
    #[serde(deserialize_with = "nullable")]
    pub app: String,
    #[serde(deserialize_with = "nullable")]
    pub cloth: String,
    #[serde(deserialize_with = "nullable")]
    pub attributes: Attributes,
    #[serde(deserialize_with = "nullable")]
    pub stairway: Stairway,
    #[serde(deserialize_with = "nullable")]
    pub is_contract: bool,
    #[serde(deserialize_with = "nullable")]
    pub affinity: i64,
    #[serde(deserialize_with = "nullable")]
    pub comment: String,
    #[serde(deserialize_with = "nullable")]
    pub background_info: String,
    #[serde(deserialize_with = "nullable")]
    pub equip: Vec<Equipment>,
    #[serde(deserialize_with = "nullable")]
    pub skills: Vec<Skill>,
    #[serde(deserialize_with = "nullable")]
    pub is_custom: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Background {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub required_race: String,
    #[serde(deserialize_with = "nullable")]
    pub required_location: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
}

// Everything the creation flow has collected at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    #[serde(deserialize_with = "nullable")]
    pub character: CharacterConfig,
    #[serde(deserialize_with = "nullable")]
    pub equipments: Vec<Equipment>,
    #[serde(deserialize_with = "nullable")]
    pub items: Vec<Item>,
    #[serde(deserialize_with = "nullable")]
    pub skills: Vec<Skill>,
    #[serde(deserialize_with = "nullable")]
    pub destined_ones: Vec<DestinedOne>,
    pub background: Option<Background>,
}

impl Snapshot {
    pub fn load_from_file(path: &str) -> Result<Self, AppError> {
        let file = std::fs::File::open(path)?;
        let snapshot: Snapshot = serde_json::from_reader(file)?;
        Ok(snapshot)
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), AppError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

// Entries flagged custom are only shown to the model; the rest are synced to the store.
pub trait CustomFlag {
    fn is_custom(&self) -> bool;
}

macro_rules! custom_flag {
    ($($ty:ty),*) => {
        $(impl CustomFlag for $ty {
            fn is_custom(&self) -> bool {
                self.is_custom
            }
        })*
    };
}

custom_flag!(Item, Skill, Equipment, DestinedOne);

pub fn presets<T: CustomFlag>(entries: &[T]) -> impl Iterator<Item = &T> {
    entries.iter().filter(|entry| !entry.is_custom())
}

pub fn customs<T: CustomFlag>(entries: &[T]) -> impl Iterator<Item = &T> {
    entries.iter().filter(|entry| entry.is_custom())
}
