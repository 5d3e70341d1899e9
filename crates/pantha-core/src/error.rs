use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanthaError {
    #[error("note not found: {0}")]
    NoteNotFound(String),

    #[error("note already exists: {0}")]
    NoteExists(String),

    #[error("invalid title '{0}': must be a single word without spaces")]
    InvalidTitle(String),

    #[error("malformed note file {path}: {reason}")]
    MalformedState { path: String, reason: String },

    #[error("notes are read-only this session")]
    ReadOnly,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(String),

    #[error("'{0}' is only available in Pantham Mode")]
    Locked(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("home directory not found: set HOME or PANTHA_HOME")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PanthaError>;
