use crate::error::LoggingError;
use chrono::Local;
use log::{LevelFilter, Metadata, Record};
use once_cell::sync::OnceCell;
use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug)]
struct FileLogger {
    log_file: PathBuf,
    level: LevelFilter,
}

static LOGGER: OnceCell<FileLogger> = OnceCell::new();

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            let log_entry = format!("{} - {} - {}\n", record.level(), timestamp, record.args());

            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.log_file)
            {
                let _ = file.write_all(log_entry.as_bytes());
            }
        }
    }

    fn flush(&self) {}
}

// Appends log records to `<dir>/log.txt`. Only the first call installs a logger.
pub fn init(dir: impl AsRef<Path>, level: LevelFilter) -> Result<(), LoggingError> {
    let dir = dir.as_ref();
    create_dir_all(dir)?;

    let logger = LOGGER.get_or_init(|| FileLogger {
        log_file: dir.join("log.txt"),
        level,
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}
