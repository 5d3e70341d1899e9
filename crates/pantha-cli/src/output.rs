use pantha_core::session::{Line, LineKind};
use serde::Serialize;
use std::io::Write;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

const PURPLE: &str = "\x1b[38;5;135m";
const LAVENDER: &str = "\x1b[38;5;183m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Writes session lines, coloured when attached to a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    pub color: bool,
}

impl Painter {
    pub fn line(&self, out: &mut impl Write, line: &Line) -> std::io::Result<()> {
        let color = match line.kind {
            LineKind::Error => RED,
            LineKind::Input => PURPLE,
            LineKind::Output => LAVENDER,
        };
        self.text(out, color, &line.text)
    }

    pub fn accent(&self, out: &mut impl Write, text: &str) -> std::io::Result<()> {
        self.text(out, PURPLE, text)
    }

    fn text(&self, out: &mut impl Write, color: &str, text: &str) -> std::io::Result<()> {
        if self.color {
            writeln!(out, "{color}{text}{RESET}")
        } else {
            writeln!(out, "{text}")
        }
    }
}
