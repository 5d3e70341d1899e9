use anyhow::Context;
use std::path::{Path, PathBuf};

/// Resolve the directory that holds `.pantha/`.
///
/// Priority:
/// 1. `--home` flag / `PANTHA_HOME` env var (passed in as `explicit`)
/// 2. The platform home directory
pub fn resolve_home(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    pantha_core::paths::default_home().context("cannot locate the notes directory")
}
