mod cmd;
mod output;
mod repl;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pantha",
    about = "Pantha Terminal: a purple-glow note shell with a gated Pantham Mode",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding .pantha/ (default: your home directory)
    #[arg(long, global = true, env = "PANTHA_HOME")]
    home: Option<PathBuf>,

    /// Version string shown in the banner (normally set by the installer)
    #[arg(long = "version-string", global = true, env = "PANTHA_VERSION")]
    version_string: Option<String>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Shell {
        /// Skip the startup banner
        #[arg(long)]
        no_banner: bool,
    },

    /// Print the location of the notes file
    Path,

    /// Inspect and validate ~/.pantha/config.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let version = cli
        .version_string
        .clone()
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    let result = root::resolve_home(cli.home.as_deref()).and_then(|home| match cli.command {
        None => cmd::shell::run(&home, &version, false),
        Some(Commands::Shell { no_banner }) => cmd::shell::run(&home, &version, no_banner),
        Some(Commands::Path) => cmd::path::run(&home, cli.json),
        Some(Commands::Config { subcommand }) => cmd::config::run(&home, subcommand, cli.json),
    });

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
