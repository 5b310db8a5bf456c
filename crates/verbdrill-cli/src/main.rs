//! verbdrill CLI: browse, quiz, and grow an English verb collection.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "verbdrill", version, about = "English verb conjugation drills")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the verb collection
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the verb collection
    List {
        /// Print the raw JSON snapshot instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Take a recall quiz on past and participle forms
    Quiz {
        /// Number of questions (default from config, 10)
        #[arg(long)]
        count: Option<usize>,

        /// Which verbs to draw from: mix, irregular, regular
        #[arg(long, default_value = "mix")]
        mode: String,

        /// Seed for a reproducible question order
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate new verbs for a topic and add them to the collection
    Generate {
        /// Topic, e.g. "travel" or "cooking"
        #[arg(long)]
        topic: String,

        /// Number of verbs to request (default from config, 5)
        #[arg(long)]
        count: Option<u32>,

        /// Provider name from the config (default: default_provider)
        #[arg(long)]
        provider: Option<String>,

        /// Model override
        #[arg(long)]
        model: Option<String>,
    },

    /// List available models
    ListModels {
        /// Filter to specific provider
        #[arg(long)]
        provider: Option<String>,
    },

    /// Create a starter config
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("verbdrill=warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;
    let data_dir = cli.data_dir;

    let result = match cli.command {
        Commands::List { json } => commands::list::execute(config, data_dir, json),
        Commands::Quiz { count, mode, seed } => {
            commands::quiz::execute(config, data_dir, count, mode, seed)
        }
        Commands::Generate {
            topic,
            count,
            provider,
            model,
        } => commands::generate::execute(config, data_dir, topic, count, provider, model).await,
        Commands::ListModels { provider } => commands::list_models::execute(provider, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
