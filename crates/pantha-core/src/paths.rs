use crate::error::{PanthaError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const PANTHA_DIR: &str = ".pantha";
pub const NOTES_FILE: &str = ".pantha/notes.json";
pub const CONFIG_FILE: &str = ".pantha/config.yaml";

pub const MAX_TITLE_LEN: usize = 128;

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// The user's home directory, as reported by the platform.
pub fn default_home() -> Result<PathBuf> {
    home::home_dir().ok_or(PanthaError::HomeNotFound)
}

pub fn pantha_dir(home: &Path) -> PathBuf {
    home.join(PANTHA_DIR)
}

pub fn notes_path(home: &Path) -> PathBuf {
    home.join(NOTES_FILE)
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// Title validation
// ---------------------------------------------------------------------------

static TITLE_RE: OnceLock<Regex> = OnceLock::new();

fn title_re() -> &'static Regex {
    TITLE_RE.get_or_init(|| Regex::new(r"^[^\s\p{Cc}]+$").unwrap())
}

/// Titles are single tokens: no whitespace, no control characters.
pub fn validate_title(title: &str) -> Result<()> {
    if title.is_empty() || title.chars().count() > MAX_TITLE_LEN || !title_re().is_match(title) {
        return Err(PanthaError::InvalidTitle(title.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
