use thiserror::Error;

// Enum for handling application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError), // Errors raised while talking to the variable store.

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error), // Errors related to snapshot (de)serialization.

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error), // Input/output errors.
}

// Errors from a store gateway. A rejected command script is not one of these:
// it is reported as an outcome of the sync.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Corrupt store snapshot: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Store snapshot is not a mapping: {0}")]
    NotAMapping(String),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    IO(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

// Reasons a command script cannot be applied to a store snapshot.
#[derive(Debug, Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: {reason}")]
    Syntax { line: usize, reason: String },

    #[error("cannot apply command to '{path}': {reason}")]
    Mutation { path: String, reason: String },
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Could not create log directory: {0}")]
    IO(#[from] std::io::Error),

    #[error("Logger already set: {0}")]
    AlreadySet(#[from] log::SetLoggerError),
}
