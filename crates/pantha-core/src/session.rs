//! Interactive session: owns one [`Store`], tracks the [`Mode`], and turns
//! input lines into [`Response`]s.

use crate::command::{Command, NoteCommand, Parser};
use crate::config::Config;
use crate::error::PanthaError;
use crate::store::{Backend, Store};
use crate::system::{self, Workspace};
use std::fmt;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Pantham,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Pantham => "pantham",
        }
    }

    /// Whether `cmd` may run in this mode.
    pub fn permits(self, cmd: &Command) -> bool {
        match (self, cmd) {
            (
                _,
                Command::Help
                | Command::Clear
                | Command::Quit
                | Command::Activate
                | Command::Deactivate
                | Command::Status
                | Command::About
                | Command::Version
                | Command::Time
                | Command::Echo(_)
                | Command::System
                | Command::Whoami
                | Command::Env
                | Command::Pwd
                | Command::Ls(_)
                | Command::Cd(_)
                | Command::Which(_),
            ) => true,
            (Mode::Pantham, Command::Note(_)) => true,
            (Mode::Normal, Command::Note(_)) => false,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// The command as the user typed it.
    Input,
    Output,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

impl Line {
    fn output(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Output,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Error,
            text: text.into(),
        }
    }
}

/// What the front end should do after printing a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Effect {
    #[default]
    None,
    Clear,
    /// Pantham Mode just turned on.
    Awaken,
    Quit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub lines: Vec<Line>,
    pub effect: Effect,
}

impl Response {
    fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }

    pub fn is_error(&self) -> bool {
        self.lines.iter().any(|l| l.kind == LineKind::Error)
    }
}

/// Append-only record of the session, emptied by `clear`.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<Line>,
}

impl Transcript {
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn extend(&mut self, lines: &[Line]) {
        self.lines.extend_from_slice(lines);
    }

    fn clear(&mut self) {
        self.lines.clear();
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct Session<B: Backend> {
    store: Store<B>,
    parser: Parser,
    activation: String,
    version: String,
    mode: Mode,
    transcript: Transcript,
    workspace: Workspace,
}

impl<B: Backend> Session<B> {
    pub fn new(store: Store<B>, config: &Config, version: impl Into<String>) -> Self {
        Self {
            store,
            parser: Parser::new(&config.activation),
            activation: config.activation.trim().to_string(),
            version: version.into(),
            mode: Mode::Normal,
            transcript: Transcript::default(),
            workspace: Workspace::current(),
        }
    }

    /// Replace the working directory used by `pwd`, `ls` and `cd`.
    pub fn with_workspace(mut self, workspace: Workspace) -> Self {
        self.workspace = workspace;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn store(&self) -> &Store<B> {
        &self.store
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Run one line of input to completion. The line goes to the parser
    /// untrimmed so free-text arguments keep their trailing whitespace.
    pub fn execute(&mut self, input: &str) -> Response {
        let mut response = Response::default();
        if input.trim().is_empty() {
            return response;
        }

        match self.parser.parse(input) {
            Ok(Some(cmd)) => self.dispatch(cmd, &mut response),
            Ok(None) => {}
            Err(e) => self.report(e, &mut response),
        }

        if response.effect == Effect::Clear {
            self.transcript.clear();
        } else {
            self.transcript.extend(&[Line {
                kind: LineKind::Input,
                text: input.trim().to_string(),
            }]);
            self.transcript.extend(&response.lines);
        }
        response
    }

    fn dispatch(&mut self, cmd: Command, out: &mut Response) {
        if !self.mode.permits(&cmd) {
            tracing::debug!(command = cmd.name(), mode = %self.mode, "command locked");
            self.report(PanthaError::Locked(cmd.name().to_string()), out);
            return;
        }

        match cmd {
            Command::Help => {
                for line in help_text(self.mode, &self.activation) {
                    out.push(Line::output(line));
                }
            }
            Command::Clear => out.effect = Effect::Clear,
            Command::Quit => {
                out.push(Line::output("Closing Pantha Terminal..."));
                out.effect = Effect::Quit;
            }
            Command::Activate => match self.mode {
                Mode::Pantham => out.push(Line::output("Pantham Mode is already active.")),
                Mode::Normal => {
                    self.set_mode(Mode::Pantham);
                    out.push(Line::output("Pantham Mode activated. Note commands unlocked."));
                    out.effect = Effect::Awaken;
                }
            },
            Command::Deactivate => match self.mode {
                Mode::Normal => out.push(Line::output("Pantham Mode is not active.")),
                Mode::Pantham => {
                    self.set_mode(Mode::Normal);
                    out.push(Line::output("Pantham Mode deactivated. Note commands locked."));
                }
            },
            Command::Status => out.push(Line::output(match self.mode {
                Mode::Pantham => "Pantham Mode: active",
                Mode::Normal => "Pantham Mode: inactive",
            })),
            Command::About => {
                out.push(Line::output("Pantha Terminal"));
                out.push(Line::output(
                    "A purple-glow terminal for quick notes, kept in ~/.pantha/notes.json.",
                ));
            }
            Command::Version => {
                out.push(Line::output(format!("Pantha Terminal v{}", self.version)));
            }
            Command::Time => out.push(Line::output(
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            )),
            Command::Echo(text) => out.push(Line::output(text)),
            Command::System => {
                for line in system::system_info(&self.version) {
                    out.push(Line::output(line));
                }
            }
            Command::Whoami => out.push(Line::output(system::whoami())),
            Command::Env => {
                for line in self.workspace.env_info() {
                    out.push(Line::output(line));
                }
            }
            Command::Pwd => out.push(Line::output(self.workspace.cwd().display().to_string())),
            Command::Ls(target) => match self.workspace.ls(target.as_deref()) {
                Ok(names) if names.is_empty() => out.push(Line::output("(empty)")),
                Ok(names) => {
                    for name in names {
                        out.push(Line::output(name));
                    }
                }
                Err(e) => self.report(e, out),
            },
            Command::Cd(target) => match self.workspace.cd(target.as_deref()) {
                Ok(dir) => {
                    let dir = dir.display().to_string();
                    out.push(Line::output(dir));
                }
                Err(e) => self.report(e, out),
            },
            Command::Which(name) => out.push(Line::output(match system::which(&name) {
                Some(path) => path.display().to_string(),
                None => "Not found".to_string(),
            })),
            Command::Note(note) => {
                if let Err(e) = self.run_note(note, out) {
                    self.report(e, out);
                }
            }
        }
    }

    fn run_note(&mut self, cmd: NoteCommand, out: &mut Response) -> crate::Result<()> {
        match cmd {
            NoteCommand::List => {
                let titles = self.store.list();
                if titles.is_empty() {
                    out.push(Line::output("(no notes yet)"));
                }
                for title in titles {
                    out.push(Line::output(format!("- {title}")));
                }
            }
            NoteCommand::Create { title } => {
                self.store.create(&title)?;
                out.push(Line::output(format!("Created note '{title}'.")));
            }
            NoteCommand::View { title } => {
                let body = self.store.view(&title)?;
                if body.is_empty() {
                    out.push(Line::output("(empty)"));
                }
                for line in body.lines() {
                    out.push(Line::output(line));
                }
            }
            NoteCommand::Write { title, text } => {
                self.store.write(&title, &text)?;
                out.push(Line::output(format!("Saved note '{title}'.")));
            }
            NoteCommand::Delete { title } => {
                self.store.delete(&title)?;
                out.push(Line::output(format!("Deleted note '{title}'.")));
            }
        }
        Ok(())
    }

    fn report(&self, err: PanthaError, out: &mut Response) {
        let hint = match &err {
            PanthaError::UnknownCommand(_) => Some("Type 'help' to see available commands.".to_string()),
            PanthaError::Locked(_) => Some(format!(
                "Type '{}' to enter Pantham Mode.",
                self.activation
            )),
            _ => None,
        };
        out.push(Line::error(format!("Error: {err}")));
        if let Some(hint) = hint {
            out.push(Line::output(hint));
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        tracing::info!(from = %self.mode, to = %mode, "mode changed");
        self.mode = mode;
    }
}

fn help_text(mode: Mode, activation: &str) -> Vec<String> {
    let mut lines = vec![
        "Commands:".to_string(),
        "  help | ?                   show this help".to_string(),
        "  clear | cls                clear the screen".to_string(),
        "  exit | quit                close Pantha Terminal".to_string(),
        "  about | version | time     information".to_string(),
        "  echo <text>                print text".to_string(),
        "  system | whoami | env      host information".to_string(),
        "  pwd | ls [path] | cd [path]  browse directories".to_string(),
        "  which <command>            locate a program".to_string(),
    ];
    match mode {
        Mode::Normal => {
            lines.push(format!("  {activation:<26} enter Pantham Mode (unlocks notes)"));
        }
        Mode::Pantham => {
            lines.push("  pantham off                leave Pantham Mode".to_string());
            lines.push("Notes:".to_string());
            lines.push("  note list                  list note titles".to_string());
            lines.push("  note create <title>        create an empty note".to_string());
            lines.push("  note view <title>          show a note".to_string());
            lines.push("  note write <title> <text>  replace a note's text".to_string());
            lines.push("  note delete <title>        delete a note".to_string());
        }
    }
    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Memory;

    fn session() -> Session<Memory> {
        Session::new(Store::in_memory(), &Config::default(), "1.2.3")
    }

    fn awake() -> Session<Memory> {
        let mut s = session();
        assert_eq!(s.execute("pantham on").effect, Effect::Awaken);
        s
    }

    #[test]
    fn starts_in_normal_mode() {
        assert_eq!(session().mode(), Mode::Normal);
    }

    #[test]
    fn note_commands_are_gated_until_activation() {
        let mut s = session();
        let r = s.execute("note create ideas");
        assert!(r.is_error());
        assert!(r.texts()[0].contains("only available in Pantham Mode"));
        assert_eq!(r.texts()[1], "Type 'pantham on' to enter Pantham Mode.");
        assert!(s.store().is_empty());

        s.execute("pantham on");
        assert_eq!(s.mode(), Mode::Pantham);
        assert!(!s.execute("note create ideas").is_error());
        assert!(s.store().contains("ideas"));

        s.execute("pantham off");
        assert_eq!(s.mode(), Mode::Normal);
        assert!(s.execute("note list").is_error());
    }

    #[test]
    fn gating_table() {
        let note = Command::Note(NoteCommand::List);
        assert!(!Mode::Normal.permits(&note));
        assert!(Mode::Pantham.permits(&note));
        for cmd in [Command::Help, Command::Clear, Command::Quit, Command::Deactivate] {
            assert!(Mode::Normal.permits(&cmd));
            assert!(Mode::Pantham.permits(&cmd));
        }
    }

    #[test]
    fn activation_is_idempotent() {
        let mut s = awake();
        let r = s.execute("pantham on");
        assert_eq!(r.effect, Effect::None);
        assert_eq!(r.texts(), vec!["Pantham Mode is already active."]);
        assert_eq!(s.mode(), Mode::Pantham);
    }

    #[test]
    fn deactivate_in_normal_is_harmless() {
        let mut s = session();
        let r = s.execute("pantham off");
        assert!(!r.is_error());
        assert_eq!(s.mode(), Mode::Normal);
    }

    #[test]
    fn custom_activation_phrase_unlocks() {
        let cfg = Config {
            activation: "wake the panther".to_string(),
            ..Config::default()
        };
        let mut s = Session::new(Store::in_memory(), &cfg, "0");
        assert!(s.execute("pantham on").is_error());
        assert_eq!(s.execute("Wake the panther").effect, Effect::Awaken);
        assert_eq!(s.mode(), Mode::Pantham);
    }

    #[test]
    fn scenario_ideas() {
        let mut s = awake();
        assert_eq!(s.execute("note list").texts(), vec!["(no notes yet)"]);
        assert_eq!(
            s.execute("note create ideas").texts(),
            vec!["Created note 'ideas'."]
        );
        assert_eq!(s.execute("note view ideas").texts(), vec!["(empty)"]);
        s.execute("note write ideas Build Pantha AI core");
        assert_eq!(
            s.execute("note view ideas").texts(),
            vec!["Build Pantha AI core"]
        );
        assert_eq!(s.execute("note list").texts(), vec!["- ideas"]);
        assert_eq!(
            s.execute("note delete ideas").texts(),
            vec!["Deleted note 'ideas'."]
        );
        let r = s.execute("note view ideas");
        assert_eq!(r.texts(), vec!["Error: note not found: ideas"]);
    }

    #[test]
    fn store_errors_become_one_line() {
        let mut s = awake();
        s.execute("note create ideas");
        let r = s.execute("note create ideas");
        assert_eq!(r.texts(), vec!["Error: note already exists: ideas"]);
        let r = s.execute("note write ghost boo");
        assert_eq!(r.texts(), vec!["Error: note not found: ghost"]);
        assert!(!s.store().contains("ghost"));
    }

    #[test]
    fn unknown_command_keeps_session_alive() {
        let mut s = session();
        let r = s.execute("dance");
        assert_eq!(r.effect, Effect::None);
        assert_eq!(
            r.texts(),
            vec![
                "Error: unknown command: dance",
                "Type 'help' to see available commands."
            ]
        );
        assert_eq!(s.execute("version").texts(), vec!["Pantha Terminal v1.2.3"]);
    }

    #[test]
    fn blank_input_produces_nothing() {
        let mut s = session();
        let r = s.execute("   ");
        assert!(r.lines.is_empty());
        assert!(s.transcript().is_empty());
    }

    #[test]
    fn transcript_records_and_clears() {
        let mut s = session();
        s.execute("echo one");
        s.execute("echo two");
        assert_eq!(s.transcript().len(), 4);
        assert_eq!(s.transcript().lines()[0].kind, LineKind::Input);
        assert_eq!(s.transcript().lines()[1].text, "one");

        let r = s.execute("clear");
        assert_eq!(r.effect, Effect::Clear);
        assert!(s.transcript().is_empty());
    }

    #[test]
    fn quit_signals_quit() {
        let mut s = session();
        assert_eq!(s.execute("exit").effect, Effect::Quit);
        assert_eq!(s.execute("QUIT").effect, Effect::Quit);
    }

    #[test]
    fn help_depends_on_mode() {
        let mut s = session();
        let normal = s.execute("help").texts().join("\n");
        assert!(normal.contains("pantham on"));
        assert!(!normal.contains("note create"));

        s.execute("pantham on");
        let pantham = s.execute("help").texts().join("\n");
        assert!(pantham.contains("note create"));
        assert!(pantham.contains("pantham off"));
    }

    #[test]
    fn status_reports_mode() {
        let mut s = session();
        assert_eq!(s.execute("pantham").texts(), vec!["Pantham Mode: inactive"]);
        s.execute("pantham on");
        assert_eq!(s.execute("pantham").texts(), vec!["Pantham Mode: active"]);
    }

    #[test]
    fn read_only_store_reports_and_continues() {
        let store = Store::open(Memory::seeded([("a", "hello")]))
            .unwrap()
            .into_read_only();
        let mut s = Session::new(store, &Config::default(), "0");
        s.execute("pantham on");
        assert_eq!(
            s.execute("note create b").texts(),
            vec!["Error: notes are read-only this session"]
        );
        assert_eq!(s.execute("note view a").texts(), vec!["hello"]);
    }

    #[test]
    fn multi_line_bodies_render_per_line() {
        let store = Store::open(Memory::seeded([("todo", "one\ntwo")])).unwrap();
        let mut s = Session::new(store, &Config::default(), "0");
        s.execute("pantham on");
        assert_eq!(s.execute("note view todo").texts(), vec!["one", "two"]);
    }

    #[test]
    fn write_keeps_trailing_whitespace() {
        let mut s = awake();
        s.execute("note create t");
        assert!(!s.execute("note write t hello  ").is_error());
        assert_eq!(s.store().view("t").unwrap(), "hello  ");
        assert_eq!(s.execute("note view t").texts(), vec!["hello  "]);
        assert_eq!(s.transcript().lines()[s.transcript().len() - 2].text, "note view t");
    }

    #[test]
    fn directory_commands_use_session_workspace() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = std::fs::canonicalize(dir.path()).unwrap();
        std::fs::create_dir_all(root.join("docs")).unwrap();
        std::fs::write(root.join("docs/readme.txt"), "hi").unwrap();
        let mut s = session().with_workspace(Workspace::new(root.clone(), None));

        assert_eq!(s.execute("pwd").texts(), vec![root.display().to_string()]);
        assert_eq!(s.execute("ls").texts(), vec!["docs/"]);
        s.execute("cd docs");
        assert_eq!(s.workspace().cwd(), root.join("docs"));
        assert_eq!(s.execute("ls").texts(), vec!["readme.txt"]);

        let r = s.execute("cd readme.txt");
        assert!(r.is_error());
        assert!(r.texts()[0].starts_with("Error: not a directory:"));
        assert!(s.execute("cd").is_error());
        assert_eq!(s.workspace().cwd(), root.join("docs"));
    }

    #[test]
    fn host_commands_work_in_both_modes() {
        let mut s = session();
        for line in ["system", "whoami", "env"] {
            assert!(!s.execute(line).is_error(), "{line} failed in normal mode");
        }
        assert_eq!(
            s.execute("which definitely-not-a-real-program-pantha").texts(),
            vec!["Not found"]
        );
        assert_eq!(s.execute("which").texts(), vec!["Error: usage: which <command>"]);

        s.execute("pantham on");
        assert!(s.execute("system").texts().contains(&"Pantha: 1.2.3"));
        let cmd = Command::Ls(None);
        assert!(Mode::Normal.permits(&cmd) && Mode::Pantham.permits(&cmd));
    }
}
