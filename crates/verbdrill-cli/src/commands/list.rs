//! The `verbdrill list` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use comfy_table::{Cell, Table};

use verbdrill_core::ids::UuidAllocator;
use verbdrill_core::VerbRecord;

use super::open_workspace;

pub fn execute(config_path: Option<PathBuf>, data_dir: Option<PathBuf>, json: bool) -> Result<()> {
    let workspace = open_workspace(config_path.as_deref(), data_dir, Arc::new(UuidAllocator))?;
    let verbs = workspace.store.records();

    if json {
        println!("{}", serde_json::to_string_pretty(verbs)?);
        return Ok(());
    }

    if !verbs.is_empty() {
        println!("{}", verb_table(verbs));
    }
    println!("{} verbs in your collection.", verbs.len());
    Ok(())
}

/// Render verbs as a table.
pub fn verb_table(verbs: &[VerbRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Base",
        "Past",
        "Participle",
        "Meaning",
        "Irregular",
        "Example",
    ]);

    for verb in verbs {
        table.add_row(vec![
            Cell::new(&verb.base),
            Cell::new(&verb.past),
            Cell::new(&verb.participle),
            Cell::new(&verb.meaning),
            Cell::new(if verb.is_irregular { "yes" } else { "no" }),
            Cell::new(&verb.example),
        ]);
    }
    table
}
