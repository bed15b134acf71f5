use anyhow::{Context, Result};
use clap::Parser;
use shipdash::{
    backends::create_backend,
    cli::{Cli, Commands, ConfigAction},
    config::AppConfig,
    console::{console, init_console},
    context_management::{ContextManager, ConversationAccountant},
    conversations::Conversation,
    tool_status::{ToolExecutionRecord, ToolStatusRegistry},
};
use std::fs;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: using default config ({})", e);
            AppConfig::default()
        }
    };

    // CLI flags take precedence over the configured verbosity
    init_console(cli.get_effective_verbosity(config.get_verbosity()));

    match cli.command {
        Commands::Check { transcript } => handle_check(&transcript, &config),
        Commands::Compact {
            transcript,
            output,
            json,
        } => {
            let backend_name = cli
                .backend
                .unwrap_or_else(|| config.default_backend.clone());
            handle_compact(&transcript, output.as_deref(), json, &backend_name, &config).await
        }
        Commands::ToolStatus { record } => handle_tool_status(&record),
        Commands::Config { action } => handle_config(action, config),
    }
}

fn read_transcript(path: &Path) -> Result<Conversation> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse transcript {}", path.display()))
}

fn handle_check(path: &Path, config: &AppConfig) -> Result<()> {
    let conversation = read_transcript(path)?;
    let accountant = ConversationAccountant::new(&config.context);
    let turns = conversation.turns();

    console().plain(&format!(
        "Turns: {} / {}",
        turns.len(),
        config.context.max_turns
    ));
    console().plain(&format!(
        "Estimated tokens: {} / {}",
        accountant.total_cost(turns),
        config.context.max_cost
    ));
    console().plain(&format!(
        "Token pressure: {:.0}%",
        accountant.token_pressure(turns) * 100.0
    ));

    if accountant.should_warn_about_pressure(turns) {
        console().warning("Conversation is approaching its token budget");
    }

    if accountant.needs_compaction(turns) {
        console().info("Compaction needed");
    } else {
        console().success("Within budget");
    }

    Ok(())
}

async fn handle_compact(
    path: &Path,
    output: Option<&Path>,
    json: bool,
    backend_name: &str,
    config: &AppConfig,
) -> Result<()> {
    let conversation = read_transcript(path)?;
    let backend = create_backend(backend_name, config)?;
    console().verbose(&format!("Using backend: {}", backend.backend_name()));

    let manager = ContextManager::from_backend(config.context.clone(), backend);

    if manager.needs_compaction(&conversation) {
        let summarized = conversation
            .len()
            .saturating_sub(config.context.keep_recent);
        if summarized > 0 {
            console().summarizing(summarized);
        }
    }

    let result = manager.compact(&conversation).await;

    if json {
        let rendered = result
            .to_json_pretty()
            .context("Failed to serialize result")?;
        // Requested output bypasses the console so -q still prints it
        println!("{}", rendered);
    } else {
        match result.notice() {
            Some(notice) => {
                console().success(&notice);
                if let Some(summary) = &result.summary_text {
                    console().plain(summary);
                }
            }
            None => console().info("Nothing to compact"),
        }
    }

    if let Some(output) = output {
        let rendered = serde_json::to_string_pretty(&result.conversation)
            .context("Failed to serialize transcript")?;
        fs::write(output, rendered)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        console().verbose(&format!("Wrote {}", output.display()));
    }

    Ok(())
}

fn handle_tool_status(path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read tool record {}", path.display()))?;
    let record: ToolExecutionRecord = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse tool record {}", path.display()))?;

    let line = ToolStatusRegistry::default().format(&record);
    console().tool_status(&line);
    Ok(())
}

fn handle_config(action: ConfigAction, config: AppConfig) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let path = AppConfig::config_path()?;
            console().plain(&format!("# {}", path.display()));
            console().plain(&config.redacted().to_toml()?);
        }
        ConfigAction::Set { key, value } => {
            // Re-read the file so a broken config aborts instead of being overwritten
            let path = AppConfig::config_path()?;
            AppConfig::set_in_file(&path, &key, &value)
                .with_context(|| format!("Failed to set {} in {}", key, path.display()))?;
            console().success(&format!("Set {} = {}", key, value));
        }
    }
    Ok(())
}
