//! The note store: an in-memory map of title to body, mirrored to a
//! [`Backend`] after every mutation.

use crate::error::{PanthaError, Result};
use crate::paths;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub type Notes = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Where a [`Store`] loads its notes from and persists them to.
pub trait Backend {
    /// Load every note. A backend with nothing stored yet returns an empty map.
    fn load(&self) -> Result<Notes>;

    /// Replace the persisted notes with `notes` in full.
    fn persist(&mut self, notes: &Notes) -> Result<()>;

    /// Short human-readable location, used in logs.
    fn location(&self) -> String;
}

/// JSON object on disk, `{"title": "body", ...}`.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The conventional notes file under `home`.
    pub fn in_home(home: &Path) -> Self {
        Self::new(paths::notes_path(home))
    }

    /// Create the directory holding the notes file.
    pub fn prepare(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) => crate::io::ensure_dir(parent),
            None => Ok(()),
        }
    }
}

impl Backend for JsonFile {
    fn load(&self) -> Result<Notes> {
        let Some(data) = crate::io::read_bytes_if_exists(&self.path)? else {
            return Ok(Notes::new());
        };
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Notes::new());
        }
        // Invalid UTF-8 surfaces here as a parse error like any other.
        serde_json::from_slice(&data).map_err(|e| PanthaError::MalformedState {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn persist(&mut self, notes: &Notes) -> Result<()> {
        let data = serde_json::to_string_pretty(notes)?;
        crate::io::atomic_write(&self.path, data.as_bytes())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps notes in memory only.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    notes: Notes,
    persists: usize,
}

impl Memory {
    pub fn seeded<I, K, V>(notes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            notes: notes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            persists: 0,
        }
    }

    /// Notes as of the last persist.
    pub fn persisted(&self) -> &Notes {
        &self.notes
    }

    /// Number of persists since construction.
    pub fn persist_count(&self) -> usize {
        self.persists
    }
}

impl Backend for Memory {
    fn load(&self) -> Result<Notes> {
        Ok(self.notes.clone())
    }

    fn persist(&mut self, notes: &Notes) -> Result<()> {
        self.notes = notes.clone();
        self.persists += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Store<B: Backend> {
    backend: B,
    notes: Notes,
    read_only: bool,
}

impl<B: Backend> Store<B> {
    /// Load the store from `backend`. A malformed document is logged and
    /// treated as an empty store; the next mutation overwrites it.
    pub fn open(backend: B) -> Result<Self> {
        let notes = match backend.load() {
            Ok(notes) => notes,
            Err(PanthaError::MalformedState { path, reason }) => {
                tracing::warn!(%path, %reason, "note file is malformed; starting empty");
                Notes::new()
            }
            Err(e) => return Err(e),
        };
        tracing::info!(location = %backend.location(), notes = notes.len(), "opened note store");
        Ok(Self {
            backend,
            notes,
            read_only: false,
        })
    }

    /// Open for reading only. Whatever can be loaded is kept; a backend that
    /// cannot be read at all yields an empty store.
    pub fn open_read_only(backend: B) -> Self {
        let notes = backend.load().unwrap_or_else(|e| {
            tracing::warn!(location = %backend.location(), error = %e, "could not load notes");
            Notes::new()
        });
        tracing::warn!(location = %backend.location(), "note store is read-only");
        Self {
            backend,
            notes,
            read_only: true,
        }
    }

    /// Reject every mutation with [`PanthaError::ReadOnly`]; reads keep working.
    pub fn into_read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.notes.contains_key(title)
    }

    /// All titles, in sorted order.
    pub fn list(&self) -> Vec<&str> {
        self.notes.keys().map(String::as_str).collect()
    }

    pub fn create(&mut self, title: &str) -> Result<()> {
        self.check_writable()?;
        paths::validate_title(title)?;
        if self.notes.contains_key(title) {
            return Err(PanthaError::NoteExists(title.to_string()));
        }
        self.notes.insert(title.to_string(), String::new());
        if let Err(e) = self.persist() {
            self.notes.remove(title);
            return Err(e);
        }
        Ok(())
    }

    pub fn view(&self, title: &str) -> Result<&str> {
        self.notes
            .get(title)
            .map(String::as_str)
            .ok_or_else(|| PanthaError::NoteNotFound(title.to_string()))
    }

    /// Replace the body of an existing note. Never creates.
    pub fn write(&mut self, title: &str, text: &str) -> Result<()> {
        self.check_writable()?;
        let Some(body) = self.notes.get_mut(title) else {
            return Err(PanthaError::NoteNotFound(title.to_string()));
        };
        let previous = std::mem::replace(body, text.to_string());
        if let Err(e) = self.persist() {
            self.notes.insert(title.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }

    pub fn delete(&mut self, title: &str) -> Result<()> {
        self.check_writable()?;
        let Some(previous) = self.notes.remove(title) else {
            return Err(PanthaError::NoteNotFound(title.to_string()));
        };
        if let Err(e) = self.persist() {
            self.notes.insert(title.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }

    fn check_writable(&self) -> Result<()> {
        if self.read_only {
            return Err(PanthaError::ReadOnly);
        }
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        self.backend.persist(&self.notes)?;
        tracing::debug!(location = %self.backend.location(), notes = self.notes.len(), "persisted notes");
        Ok(())
    }
}

impl Store<Memory> {
    pub fn in_memory() -> Self {
        Self {
            backend: Memory::default(),
            notes: Notes::new(),
            read_only: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
