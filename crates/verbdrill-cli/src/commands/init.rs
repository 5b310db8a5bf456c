//! The `verbdrill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("verbdrill.toml").exists() {
        println!("verbdrill.toml already exists, skipping.");
    } else {
        std::fs::write("verbdrill.toml", SAMPLE_CONFIG)?;
        println!("Created verbdrill.toml");
    }

    println!("\nNext steps:");
    println!("  1. Export GEMINI_API_KEY (or edit verbdrill.toml)");
    println!("  2. Run: verbdrill quiz");
    println!("  3. Run: verbdrill generate --topic travel");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# verbdrill configuration

default_provider = "gemini"
default_model = "gemini-2.5-flash"
default_temperature = 0.7
quiz_size = 10
generate_count = 5
meaning_language = "Korean"
# data_dir = "/path/to/verbs"

[providers.gemini]
type = "gemini"
api_key = "${GEMINI_API_KEY}"

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"
"#;
