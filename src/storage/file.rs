//! Reading and atomically rewriting the tickets file.
//!
//! Writes go to `<file>.tmp` next to the target, are synced, and then renamed
//! over it, so readers only ever see the old or the new collection.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

// Trait must be in scope for `.write_all()` on `File`.
use io::Write;

use crate::model::Ticket;

use super::Result;

/// Loads the persisted collection.
///
/// A missing file is a valid empty collection.
pub(super) fn load(path: &Path) -> Result<Vec<Ticket>> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&json)?)
}

/// Replaces the persisted collection with `tickets`.
pub(super) fn write(path: &Path, tickets: &[Ticket]) -> Result<()> {
    let json = serde_json::to_string_pretty(tickets)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path(path);
    let cleanup = |e: io::Error| {
        let _ = fs::remove_file(&temp_path);
        e
    };

    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes()).map_err(cleanup)?;
    file.sync_all().map_err(cleanup)?;
    drop(file);

    fs::rename(&temp_path, path).map_err(cleanup)?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
