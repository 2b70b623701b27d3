mod aggregate;
mod auth;
mod budget;
mod export;
mod format;
mod ledger;
mod models;
mod run;
mod session;
mod store;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let db_path = get_db_path()?;
    let kv = store::KvStore::open(&db_path)?;

    if args.len() < 2 {
        run::as_cli(&["ledgerbook".into(), "--help".into()], kv)
    } else {
        run::as_cli(&args, kv)
    }
}

fn get_db_path() -> Result<std::path::PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "ledgerbook", "Ledgerbook")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("ledgerbook.db"))
}
