//! Line grammar for the interactive shell.
//!
//! Keywords match case-insensitively. Titles are a single token and match
//! exactly. `note write` and `echo` take the rest of the line verbatim,
//! trailing whitespace included.

use crate::error::{PanthaError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteCommand {
    List,
    Create { title: String },
    View { title: String },
    Write { title: String, text: String },
    Delete { title: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Clear,
    Quit,
    /// The configured activation phrase.
    Activate,
    Deactivate,
    Status,
    About,
    Version,
    Time,
    Echo(String),
    System,
    Whoami,
    Env,
    Pwd,
    Ls(Option<String>),
    /// `None` means the home directory.
    Cd(Option<String>),
    Which(String),
    Note(NoteCommand),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Clear => "clear",
            Command::Quit => "quit",
            Command::Activate => "pantham on",
            Command::Deactivate => "pantham off",
            Command::Status => "pantham",
            Command::About => "about",
            Command::Version => "version",
            Command::Time => "time",
            Command::Echo(_) => "echo",
            Command::System => "system",
            Command::Whoami => "whoami",
            Command::Env => "env",
            Command::Pwd => "pwd",
            Command::Ls(_) => "ls",
            Command::Cd(_) => "cd",
            Command::Which(_) => "which",
            Command::Note(NoteCommand::List) => "note list",
            Command::Note(NoteCommand::Create { .. }) => "note create",
            Command::Note(NoteCommand::View { .. }) => "note view",
            Command::Note(NoteCommand::Write { .. }) => "note write",
            Command::Note(NoteCommand::Delete { .. }) => "note delete",
        }
    }
}

const NOTE_USAGE: &str = "note list | create <title> | view <title> | write <title> <text...> | delete <title>";

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Parser {
    activation: Option<String>,
}

impl Parser {
    pub fn new(activation: &str) -> Self {
        let normalized = normalize(activation);
        Self {
            activation: (!normalized.is_empty()).then_some(normalized),
        }
    }

    /// A parser that never produces [`Command::Activate`].
    pub fn without_activation() -> Self {
        Self { activation: None }
    }

    /// Parse one line. Blank input yields `Ok(None)`.
    ///
    /// Only leading whitespace is stripped from `line`; the tail is kept for
    /// commands that take free text.
    pub fn parse(&self, line: &str) -> Result<Option<Command>> {
        let line = line.trim_start();
        if line.trim_end().is_empty() {
            return Ok(None);
        }
        if self
            .activation
            .as_deref()
            .is_some_and(|phrase| normalize(line) == phrase)
        {
            return Ok(Some(Command::Activate));
        }

        let (word, rest) = split_word(line);
        let cmd = match word.to_lowercase().as_str() {
            "help" | "?" => no_args(Command::Help, rest, "help")?,
            "clear" | "cls" => no_args(Command::Clear, rest, "clear")?,
            "exit" | "quit" | "q" => no_args(Command::Quit, rest, "quit")?,
            "about" => no_args(Command::About, rest, "about")?,
            "version" => no_args(Command::Version, rest, "version")?,
            "time" => no_args(Command::Time, rest, "time")?,
            "echo" => Command::Echo(rest.to_string()),
            "system" => no_args(Command::System, rest, "system")?,
            "whoami" => no_args(Command::Whoami, rest, "whoami")?,
            "env" => no_args(Command::Env, rest, "env")?,
            "pwd" => no_args(Command::Pwd, rest, "pwd")?,
            "ls" => Command::Ls(optional_word(rest, "ls [path]")?),
            "cd" => Command::Cd(optional_word(rest, "cd [path]")?),
            "which" => match optional_word(rest, "which <command>")? {
                Some(name) => Command::Which(name),
                None => return Err(PanthaError::Usage("which <command>".to_string())),
            },
            "pantham" => parse_pantham(rest)?,
            "note" => Command::Note(parse_note(rest)?),
            _ => return Err(PanthaError::UnknownCommand(word.to_string())),
        };
        Ok(Some(cmd))
    }
}

fn parse_pantham(rest: &str) -> Result<Command> {
    match rest.trim_end().to_lowercase().as_str() {
        "" => Ok(Command::Status),
        "off" => Ok(Command::Deactivate),
        _ => Err(PanthaError::Usage("pantham off".to_string())),
    }
}

fn parse_note(rest: &str) -> Result<NoteCommand> {
    let (sub, args) = split_word(rest);
    match sub.to_lowercase().as_str() {
        "list" => {
            if args.trim_end().is_empty() {
                Ok(NoteCommand::List)
            } else {
                Err(PanthaError::Usage("note list".to_string()))
            }
        }
        "create" => single_title(args, "note create <title>")
            .map(|title| NoteCommand::Create { title }),
        "view" => single_title(args, "note view <title>").map(|title| NoteCommand::View { title }),
        "delete" => {
            single_title(args, "note delete <title>").map(|title| NoteCommand::Delete { title })
        }
        "write" => {
            let (title, text) = split_word(args);
            if title.is_empty() || text.trim_end().is_empty() {
                return Err(PanthaError::Usage("note write <title> <text...>".to_string()));
            }
            Ok(NoteCommand::Write {
                title: title.to_string(),
                text: text.to_string(),
            })
        }
        _ => Err(PanthaError::Usage(NOTE_USAGE.to_string())),
    }
}

fn single_title(args: &str, usage: &str) -> Result<String> {
    match optional_word(args, usage)? {
        Some(title) => Ok(title),
        None => Err(PanthaError::Usage(usage.to_string())),
    }
}

/// Zero or one word; more is a usage error.
fn optional_word(args: &str, usage: &str) -> Result<Option<String>> {
    let (word, extra) = split_word(args);
    if !extra.trim_end().is_empty() {
        return Err(PanthaError::Usage(usage.to_string()));
    }
    Ok((!word.is_empty()).then(|| word.to_string()))
}

fn no_args(cmd: Command, rest: &str, usage: &str) -> Result<Command> {
    if rest.trim_end().is_empty() {
        Ok(cmd)
    } else {
        Err(PanthaError::Usage(usage.to_string()))
    }
}

/// Split off the first whitespace-delimited word. The remainder has its
/// leading whitespace removed and is otherwise untouched.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim_start()),
        None => (s, ""),
    }
}

fn normalize(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
