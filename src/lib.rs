pub mod character;
pub mod command;
pub mod currency;
pub mod error;
pub mod labels;
pub mod logging;
pub mod presence;
pub mod prompt;
pub mod rarity;
pub mod settings;
pub mod store;
pub mod sync;
pub mod tiers;

// Re-export commonly used items for easier access
pub use character::{
    AttributePoints, Attributes, Background, CharacterConfig, DestinedOne, Equipment, Item, Skill,
    Snapshot, Stairway,
};
pub use command::{Command, CommandScript};
pub use currency::{Currency, parse_currency};
pub use error::{AppError, ScriptError, StoreError};
pub use prompt::{build_prompt_document, generate_ai_prompt};
pub use rarity::Rarity;
pub use settings::Settings;
pub use store::{FileStore, MemoryStore, StoreGateway, StoreScope};
pub use sync::{SyncOutcome, compile_commands, write_character_to_store};
pub use tiers::{BASE_STAT, StandardTiers, TierResolver, format_attribute};
