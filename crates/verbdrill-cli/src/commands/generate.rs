//! The `verbdrill generate` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use verbdrill_core::ids::{IdAllocator, UuidAllocator};
use verbdrill_core::GenerationError;
use verbdrill_providers::build_client;

use super::list::verb_table;
use super::open_workspace;

pub async fn execute(
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    topic: String,
    count: Option<u32>,
    provider: Option<String>,
    model: Option<String>,
) -> Result<()> {
    let ids: Arc<dyn IdAllocator> = Arc::new(UuidAllocator);
    let mut workspace = open_workspace(config_path.as_deref(), data_dir, ids.clone())?;
    let count = count.unwrap_or(workspace.config.generate_count);

    let client = build_client(
        &workspace.config,
        provider.as_deref(),
        model.as_deref(),
        ids,
    )?;

    eprintln!(
        "Generating {count} verbs about \"{topic}\" with {} ({})...",
        client.backend_name(),
        client.options().model
    );

    let generated = match client.generate(&topic, count).await {
        Ok(verbs) => verbs,
        Err(e @ GenerationError::Configuration(_)) => return Err(e.into()),
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("could not generate verbs for topic \"{topic}\"")))
        }
    };
    if generated.len() != count as usize {
        tracing::warn!(
            requested = count,
            received = generated.len(),
            "backend returned a different number of verbs"
        );
    }

    let outcome = workspace.store.merge(generated).with_context(|| {
        format!(
            "failed to save the verb collection in {}",
            workspace.data_dir.display()
        )
    })?;

    if outcome.nothing_new() {
        println!("All generated verbs are already in your collection.");
        return Ok(());
    }

    println!("{}", verb_table(&outcome.accepted));
    println!(
        "Added {} new verbs ({} skipped as duplicates). Collection now holds {}.",
        outcome.accepted.len(),
        outcome.rejected,
        workspace.store.len()
    );
    Ok(())
}
