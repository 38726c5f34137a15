//! Cache command - restore, save and inspect the download cache

use crate::cache::{self, CacheManager, FsCacheStore, StoreEntry};
use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::config::{Config, ConfigManager};
use crate::error::{CsupError, CsupResult};
use std::path::PathBuf;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> CsupResult<()> {
    match args.action {
        CacheAction::Restore { hash, hash_file } => {
            let hash = resolve_hash(hash, &hash_file)?;
            let outcome = manager(config).restore(&hash).await;
            println!("Cache restore: {}", outcome);
            Ok(())
        }
        CacheAction::Save { hash, hash_file } => {
            let hash = resolve_hash(hash, &hash_file)?;
            let outcome = manager(config).save(&hash).await;
            println!("Cache save: {}", outcome);
            Ok(())
        }
        CacheAction::List { format } => list_entries(config, format),
    }
}

/// Resolve the dependency hash from a literal or from hashed files.
pub fn resolve_hash(hash: Option<String>, hash_files: &[PathBuf]) -> CsupResult<String> {
    match hash {
        Some(hash) if !hash.trim().is_empty() => Ok(hash),
        _ if !hash_files.is_empty() => cache::hash_files(hash_files),
        _ => Err(CsupError::User(
            "either --hash or --hash-file is required".to_string(),
        )),
    }
}

fn manager(config: &Config) -> CacheManager {
    let store = FsCacheStore::new(ConfigManager::store_root(config));
    CacheManager::new(Box::new(store), ConfigManager::cache_dir(config))
}

fn list_entries(config: &Config, format: OutputFormat) -> CsupResult<()> {
    let store = FsCacheStore::new(ConfigManager::store_root(config));
    let entries = store.list()?;

    if entries.is_empty() {
        println!("No cache entries found.");
        return Ok(());
    }

    match format {
        OutputFormat::Table => print_table(&entries),
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Plain => print_plain(&entries),
    }

    Ok(())
}

fn print_table(entries: &[StoreEntry]) {
    println!("{:<50} {:<10} {:<20}", "KEY", "SIZE", "CREATED");
    println!("{}", "-".repeat(80));

    for entry in entries {
        let created = entry.created_at.format("%Y-%m-%d %H:%M").to_string();
        println!(
            "{:<50} {:<10} {:<20}",
            entry.key,
            cache::format_bytes(entry.size_bytes),
            created
        );
    }

    println!();
    println!("Total: {} entr{}", entries.len(), if entries.len() == 1 { "y" } else { "ies" });
}

fn print_json(entries: &[StoreEntry]) -> CsupResult<()> {
    #[derive(serde::Serialize)]
    struct EntryJson {
        key: String,
        size_bytes: u64,
        created_at: String,
    }

    let json_entries: Vec<EntryJson> = entries
        .iter()
        .map(|e| EntryJson {
            key: e.key.clone(),
            size_bytes: e.size_bytes,
            created_at: e.created_at.to_rfc3339(),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&json_entries)?);
    Ok(())
}

fn print_plain(entries: &[StoreEntry]) {
    for entry in entries {
        println!("{}", entry.key);
    }
}
