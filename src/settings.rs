// Import necessary modules for file I/O and serialization.
use crate::error::SettingsError;
use crate::store::{STORE_DIR, StoreScope};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

pub const SETTINGS_PATH: &str = "./data/settings.json";

// Settings for the exporter, stored as JSON next to the store files.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub store_dir: String,  // Directory holding one variables file per scope.
    pub scope: StoreScope,  // Which message's variables a sync writes to.
    pub log_dir: String,    // Directory for log.txt.
    pub print_prompt: bool, // Print the prompt document after syncing.
    pub debug_mode: bool,   // Log at debug level instead of info.
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            store_dir: STORE_DIR.to_string(),
            scope: StoreScope::LatestMessage,
            log_dir: "./data".to_string(),
            print_prompt: true,
            debug_mode: false,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    // Load settings from the default path, falling back to defaults when there is no file yet.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_or_default(SETTINGS_PATH)
    }

    pub fn load_or_default(path: &str) -> Result<Self, SettingsError> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }
        Self::load_settings_from_file(path)
    }

    pub fn load_settings_from_file(path: &str) -> Result<Self, SettingsError> {
        let data = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&data)?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), SettingsError> {
        let data = serde_json::to_string_pretty(self)?;
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?; // Create the directory if it doesn't exist.
        }
        let mut file = fs::File::create(path)?;
        file.write_all(data.as_bytes())?;
        Ok(())
    }
}
