//! Host information and a working directory owned by the session.
//!
//! `cd` moves the session's directory only; the process cwd is left alone.

use crate::error::{PanthaError, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Workspace {
    cwd: PathBuf,
    home: Option<PathBuf>,
}

impl Workspace {
    pub fn new(cwd: impl Into<PathBuf>, home: Option<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            home,
        }
    }

    /// Start from the process cwd and the platform home directory.
    pub fn current() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(cwd, home::home_dir())
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Expand a leading `~` and resolve relative paths against the cwd.
    pub fn resolve(&self, arg: &str) -> Result<PathBuf> {
        let expanded = if arg == "~" {
            self.home_or_err()?.to_path_buf()
        } else if let Some(rest) = arg.strip_prefix("~/") {
            self.home_or_err()?.join(rest)
        } else {
            PathBuf::from(arg)
        };
        Ok(self.cwd.join(expanded))
    }

    /// Change directory; no argument means home.
    pub fn cd(&mut self, target: Option<&str>) -> Result<&Path> {
        let path = match target {
            Some(arg) => self.resolve(arg)?,
            None => self.home_or_err()?.to_path_buf(),
        };
        if !std::fs::metadata(&path)?.is_dir() {
            return Err(PanthaError::NotADirectory(path.display().to_string()));
        }
        self.cwd = std::fs::canonicalize(&path)?;
        Ok(&self.cwd)
    }

    /// Sorted entry names; directories carry a trailing `/`.
    pub fn ls(&self, target: Option<&str>) -> Result<Vec<String>> {
        let path = match target {
            Some(arg) => self.resolve(arg)?,
            None => self.cwd.clone(),
        };
        if !std::fs::metadata(&path)?.is_dir() {
            return Err(PanthaError::NotADirectory(path.display().to_string()));
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&path)? {
            let entry = entry?;
            let mut name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type()?.is_dir() {
                name.push('/');
            }
            names.push(name);
        }
        names.sort();
        Ok(names)
    }

    pub fn env_info(&self) -> Vec<String> {
        let shell = std::env::var("SHELL")
            .or_else(|_| std::env::var("COMSPEC"))
            .unwrap_or_else(|_| "unknown".to_string());
        let home = self
            .home
            .as_ref()
            .map(|h| h.display().to_string())
            .unwrap_or_else(|| "(unknown)".to_string());
        vec![format!("Shell: {shell}"), format!("Home: {home}")]
    }

    fn home_or_err(&self) -> Result<&Path> {
        self.home.as_deref().ok_or(PanthaError::HomeNotFound)
    }
}

/// Login name from the environment.
pub fn whoami() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "pantha".to_string())
}

pub fn system_info(version: &str) -> Vec<String> {
    vec![
        format!("OS: {} ({})", std::env::consts::OS, std::env::consts::FAMILY),
        format!("Machine: {}", std::env::consts::ARCH),
        format!("Pantha: {version}"),
    ]
}

/// Locate an executable on `PATH`.
pub fn which(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
