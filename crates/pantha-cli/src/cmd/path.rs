use crate::output::print_json;
use pantha_core::paths;
use std::path::Path;

pub fn run(home: &Path, json: bool) -> anyhow::Result<()> {
    let notes = paths::notes_path(home);
    if json {
        print_json(&serde_json::json!({
            "notes": notes,
            "config": paths::config_path(home),
            "exists": notes.exists(),
        }))?;
    } else {
        println!("{}", notes.display());
    }
    Ok(())
}
