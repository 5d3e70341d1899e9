//! The read-eval-print loop around a [`Session`].

use crate::output::{Painter, CLEAR_SCREEN};
use anyhow::Context;
use pantha_core::session::{Effect, Session};
use pantha_core::store::Backend;
use std::io::{BufRead, Write};
use std::time::Duration;

const BANNER: &str = r"
  ____   _    _   _ _____ _   _    _
 |  _ \ / \  | \ | |_   _| | | |  / \
 | |_) / _ \ |  \| | | | | |_| | / _ \
 |  __/ ___ \| |\  | | | |  _  |/ ___ \
 |_| /_/   \_\_| \_| |_| |_| |_/_/   \_\
";

const AWAKEN_FRAMES: &[&str] = &[
    "  the panther stirs .",
    "  the panther stirs . .",
    "  the panther stirs . . .",
    "  eyes open. PANTHAM AWAKE.",
];

pub struct ReplOptions {
    pub prompt: String,
    pub banner: bool,
    pub animation: bool,
    pub painter: Painter,
    /// Tell the user up front that mutations will be refused.
    pub read_only: bool,
}

pub fn run<B: Backend>(
    session: &mut Session<B>,
    opts: &ReplOptions,
    mut input: impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if opts.banner {
        for line in BANNER.lines().skip(1) {
            opts.painter.accent(out, line)?;
        }
        opts.painter
            .accent(out, &format!("  Pantha Terminal v{}", session.version()))?;
        writeln!(out, "  Type 'help' to see commands.")?;
    }
    if opts.read_only {
        writeln!(out, "  Notes are read-only this session.")?;
    }

    let mut buf = Vec::new();
    loop {
        write!(out, "{}", opts.prompt)?;
        out.flush()?;

        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("failed to read input")?;
        if read == 0 {
            writeln!(out)?;
            writeln!(out, "Closing Pantha Terminal...")?;
            break;
        }
        // Undecodable bytes become U+FFFD instead of ending the session.
        let line = String::from_utf8_lossy(trim_newline(&buf));

        let response = session.execute(&line);
        match response.effect {
            Effect::Clear if opts.painter.color => write!(out, "{CLEAR_SCREEN}")?,
            Effect::Awaken if opts.animation => awaken(opts, out)?,
            _ => {}
        }
        for line in &response.lines {
            opts.painter.line(out, line)?;
        }
        if response.effect == Effect::Quit {
            break;
        }
    }
    out.flush()?;
    Ok(())
}

fn trim_newline(mut bytes: &[u8]) -> &[u8] {
    if let Some(rest) = bytes.strip_suffix(b"\n") {
        bytes = rest;
    }
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}

fn awaken(opts: &ReplOptions, out: &mut impl Write) -> std::io::Result<()> {
    for frame in AWAKEN_FRAMES {
        opts.painter.accent(out, frame)?;
        out.flush()?;
        std::thread::sleep(Duration::from_millis(150));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantha_core::config::Config;
    use pantha_core::store::{Memory, Store};
    use std::io::Cursor;

    fn opts() -> ReplOptions {
        ReplOptions {
            prompt: "pantha> ".to_string(),
            banner: false,
            animation: false,
            painter: Painter { color: false },
            read_only: false,
        }
    }

    fn drive(script: impl AsRef<[u8]>, opts: &ReplOptions) -> (String, Session<Memory>) {
        let mut session = Session::new(Store::in_memory(), &Config::default(), "9.9.9");
        let mut out = Vec::new();
        run(&mut session, opts, Cursor::new(script.as_ref()), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), session)
    }

    #[test]
    fn runs_until_quit() {
        let (out, session) = drive("pantham on\nnote create ideas\nquit\nnote create later\n", &opts());
        assert!(out.contains("Created note 'ideas'."));
        assert!(out.contains("Closing Pantha Terminal..."));
        assert!(!session.store().contains("later"));
    }

    #[test]
    fn eof_ends_session() {
        let (out, _) = drive("echo hi\n", &opts());
        assert!(out.contains("hi\n"));
        assert!(out.ends_with("Closing Pantha Terminal...\n"));
    }

    #[test]
    fn invalid_utf8_line_does_not_end_session() {
        let (out, _) = drive(b"echo before\n\xff\necho after\nquit\n", &opts());
        assert!(out.contains("before\n"));
        assert!(out.contains("Error: unknown command: \u{fffd}"));
        assert!(out.contains("after\n"));
        assert!(out.contains("Closing Pantha Terminal..."));
    }

    #[test]
    fn crlf_and_unterminated_last_line() {
        let (out, session) = drive("pantham on\r\nnote create a\r\nnote write a hi ", &opts());
        assert!(out.contains("Created note 'a'."));
        assert_eq!(session.store().view("a").unwrap(), "hi ");
        assert!(out.ends_with("Closing Pantha Terminal...\n"));
    }

    #[test]
    fn banner_shows_version() {
        let opts = ReplOptions {
            banner: true,
            ..opts()
        };
        let (out, _) = drive("", &opts);
        assert!(out.contains("Pantha Terminal v9.9.9"));
    }

    #[test]
    fn clear_writes_escape_only_on_terminals() {
        let (plain, _) = drive("clear\n", &opts());
        assert!(!plain.contains(CLEAR_SCREEN));

        let colored = ReplOptions {
            painter: Painter { color: true },
            ..opts()
        };
        let (tty, _) = drive("clear\n", &colored);
        assert!(tty.contains(CLEAR_SCREEN));
    }

    #[test]
    fn awakening_sequence_plays_when_enabled() {
        let animated = ReplOptions {
            animation: true,
            ..opts()
        };
        let (out, _) = drive("pantham on\n", &animated);
        assert!(out.contains("PANTHAM AWAKE"));

        let (out, _) = drive("pantham on\n", &opts());
        assert!(!out.contains("PANTHAM AWAKE"));
        assert!(out.contains("Pantham Mode activated."));
    }
}
