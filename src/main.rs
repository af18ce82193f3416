use anyhow::Context;
use destiny_export::logging;
use destiny_export::{
    FileStore, Settings, Snapshot, StandardTiers, SyncOutcome, generate_ai_prompt,
    write_character_to_store,
};
use log::LevelFilter;

const USAGE: &str = "usage: destiny_export <snapshot.json> [settings.json]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let snapshot_path = args.next().context(USAGE)?;
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(&path),
        None => Settings::load(),
    }
    .context("Failed to load settings")?;

    let level = if settings.debug_mode {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = logging::init(&settings.log_dir, level) {
        eprintln!("Logging disabled: {e}");
    }

    let snapshot = Snapshot::load_from_file(&snapshot_path)
        .with_context(|| format!("Failed to load snapshot from {snapshot_path}"))?;

    let store = FileStore::new(&settings.store_dir);
    let outcome = write_character_to_store(
        &store,
        &settings.scope,
        &snapshot.character,
        &snapshot.items,
        &snapshot.skills,
        &snapshot.destined_ones,
    )
    .await
    .context("Failed to sync the variable store")?;

    match outcome {
        SyncOutcome::Applied { commands } => {
            eprintln!("✅ {commands} commands written to the {}", settings.scope)
        }
        SyncOutcome::Rejected => eprintln!("⚠️ Command script rejected, nothing was written"),
    }

    if settings.print_prompt {
        println!("{}", generate_ai_prompt(&snapshot, &StandardTiers));
    }

    Ok(())
}
