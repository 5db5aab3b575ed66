//! State file persistence.
//!
//! The engine lives in one bincode snapshot file. Every mutating command
//! loads it, applies one operation and writes it back.

use std::path::Path;

use anyhow::Context;
use x1_engine::{EngineSnapshot, TokenEngine};
use x1_types::Clock;

/// Load and verify the engine stored at `path`.
pub fn load<C: Clock>(path: &Path, clock: C) -> anyhow::Result<TokenEngine<C>> {
    let bytes = std::fs::read(path).with_context(|| {
        format!(
            "failed to read state file {} (run `x1 init` first)",
            path.display()
        )
    })?;
    let snapshot = EngineSnapshot::from_bytes(&bytes)
        .with_context(|| format!("failed to decode state file {}", path.display()))?;
    let engine = TokenEngine::restore(snapshot, clock)
        .with_context(|| format!("state file {} is not usable", path.display()))?;
    tracing::debug!(path = %path.display(), "state loaded");
    Ok(engine)
}

/// Write the engine to `path`, replacing the previous file only once the new
/// one is fully written.
pub fn save<C: Clock>(engine: &TokenEngine<C>, path: &Path) -> anyhow::Result<()> {
    let bytes = engine.snapshot().to_bytes()?;
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, &bytes)
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "state saved");
    Ok(())
}
