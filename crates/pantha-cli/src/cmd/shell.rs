use crate::output::Painter;
use crate::repl::{self, ReplOptions};
use anyhow::Context;
use pantha_core::config::Config;
use pantha_core::session::Session;
use pantha_core::store::{JsonFile, Store};
use std::io::IsTerminal;
use std::path::Path;

pub fn run(home: &Path, version: &str, no_banner: bool) -> anyhow::Result<()> {
    let mut config = Config::load(home).context("failed to load config")?;
    for warning in config.repair() {
        tracing::warn!(level = ?warning.level, "{}", warning.message);
        eprintln!("warning: config: {}", warning.message);
    }

    let backend = JsonFile::in_home(home);
    let (store, read_only) = match backend.prepare() {
        Ok(()) => (
            Store::open(backend).context("failed to open notes")?,
            false,
        ),
        Err(e) => {
            tracing::warn!(error = %e, "cannot create notes directory; continuing read-only");
            eprintln!("warning: cannot create notes directory: {e}");
            (Store::open_read_only(backend), true)
        }
    };

    let mut session = Session::new(store, &config, version);
    let terminal = std::io::stdout().is_terminal();
    let opts = ReplOptions {
        prompt: config.prompt.clone(),
        banner: config.banner && !no_banner,
        animation: config.animation && terminal,
        painter: Painter { color: terminal },
        read_only,
    };

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    repl::run(&mut session, &opts, stdin.lock(), &mut stdout)
}
