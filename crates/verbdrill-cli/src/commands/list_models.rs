//! The `verbdrill list-models` command.

use std::path::PathBuf;

use anyhow::Result;

use verbdrill_providers::create_provider;

pub fn execute(provider_filter: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = verbdrill_providers::config::load_config_from(config_path.as_deref())?;

    let mut names: Vec<&String> = config.providers.keys().collect();
    names.sort();

    let mut found_any = false;
    for name in names {
        if provider_filter.as_ref().is_some_and(|f| f != name) {
            continue;
        }

        let provider = match create_provider(&config.providers[name]) {
            Ok(p) => p,
            Err(e) => {
                println!("Provider: {name} (unavailable: {e})\n");
                continue;
            }
        };

        let models = provider.available_models();
        if models.is_empty() {
            continue;
        }
        found_any = true;
        let default_model = config
            .default_model
            .as_deref()
            .filter(|_| *name == config.default_provider)
            .or_else(|| models.first().map(|m| m.id.as_str()));
        println!("Provider: {name}");
        for model in &models {
            let marker = if *name == config.default_provider
                && default_model == Some(model.id.as_str())
            {
                " (default)"
            } else {
                ""
            };
            println!(
                "  {} - {} ({}K context){marker}",
                model.id,
                model.name,
                model.max_context / 1000,
            );
        }
        println!();
    }

    if !found_any {
        println!("No providers configured. Run `verbdrill init` to create a config file.");
    }

    Ok(())
}
