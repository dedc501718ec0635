use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

/// Resolves the directory holding the jsonl data files.
///
/// Order: `DAYBOOK_DATA` override, the platform data dir, then a
/// dotted directory in the cwd as a last resort.
#[tracing::instrument]
pub fn resolve_data_dir() -> anyhow::Result<PathBuf> {
    let dir = if let Some(path) = env::var_os("DAYBOOK_DATA") {
        PathBuf::from(path)
    } else if let Some(base) = dirs::data_dir() {
        base.join("daybook")
    } else {
        PathBuf::from(".daybook_data")
    };

    if !dir.exists() {
        info!(dir = %dir.display(), "creating data directory");
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    Ok(dir)
}
