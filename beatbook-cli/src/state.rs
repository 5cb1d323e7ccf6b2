use anyhow::{Context, Result};
use beatbook_core::Snapshot;
use std::fs;
use std::path::{Path, PathBuf};

pub fn beatbook_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".beatbook"))
}

pub fn ensure_beatbook_home() -> Result<PathBuf> {
    let dir = beatbook_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn snapshot_path() -> Result<PathBuf> {
    Ok(ensure_beatbook_home()?.join("snapshot.json"))
}

/// Persist the freshly built generation. Written only after a fully
/// successful fetch+build, so the cache is never a half-refresh.
pub fn write_snapshot(snapshot: &Snapshot) -> Result<()> {
    write_snapshot_to(&snapshot_path()?, snapshot)
}

/// Write via a sibling temp file and rename it into place. The rename is the
/// publish point: a concurrent reader sees the previous complete file or the
/// new complete file, never a truncated one.
fn write_snapshot_to(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("publish {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

/// The last complete generation, or None if no fetch has succeeded yet.
pub fn read_snapshot() -> Result<Option<Snapshot>> {
    read_snapshot_from(&snapshot_path()?)
}

fn read_snapshot_from(path: &Path) -> Result<Option<Snapshot>> {
    if !path.exists() {
        return Ok(None);
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(Some(serde_json::from_str(&s).context("parse snapshot.json")?))
}
