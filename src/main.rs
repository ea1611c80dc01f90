use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use edu_search::config::{find_config_file, load_config, load_from_env, Config};
use edu_search::models::SearchOutcome;
use edu_search::search::EducationalSearch;
use is_terminal::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Edu Search - Search several educational sources at once and rank what they return
#[derive(Parser, Debug)]
#[command(name = "edu-search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search educational sources concurrently and rank results by educational quality", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Per-source timeout in seconds (overrides the configuration)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search educational sources for a query
    #[command(alias = "s")]
    Search {
        /// Search query string
        query: String,

        /// Sources to search, comma separated (default: all configured sources)
        #[arg(long, short, value_delimiter = ',')]
        sources: Vec<String>,
    },

    /// List configured sources
    Sources,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("edu_search={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = resolve_config(cli.config.as_ref())?;
    if let Some(timeout) = cli.timeout {
        config.search.timeout_secs = timeout;
    }

    let service = EducationalSearch::from_config(&config)?;

    match cli.command {
        Commands::Search { query, sources } => {
            let outcome = service.search(&query, &sources).await?;
            output_outcome(&outcome, cli.output)?;
        }
        Commands::Sources => {
            for src in service.registry().all() {
                println!("{} - {}", src.id(), src.name());
            }
        }
    }

    Ok(())
}

fn resolve_config(explicit: Option<&PathBuf>) -> Result<Config> {
    let config = if let Some(path) = explicit {
        load_config(path)?
    } else if let Some(path) = find_config_file() {
        tracing::info!("Using config file: {}", path.display());
        load_config(&path)?
    } else {
        load_from_env()?
    };
    Ok(config)
}

fn output_outcome(outcome: &SearchOutcome, format: OutputFormat) -> Result<()> {
    let actual_format = if format == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    };

    match actual_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(outcome)?);
        }
        OutputFormat::Plain => {
            for result in &outcome.results {
                println!(
                    "{} ({}, {:.0}%)",
                    result.item.title,
                    result.item.source_name,
                    result.final_educational_score * 100.0
                );
                println!("  {}", result.item.snippet);
                println!("  URL: {}", result.item.url);
                println!();
            }
            print_footer(outcome);
        }
        OutputFormat::Table => {
            use comfy_table::{Attribute, Cell, Table};
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["Title", "Source", "Type", "Score", "URL"]);

            for result in &outcome.results {
                table.add_row(vec![
                    Cell::new(truncate(&result.item.title, 50)).add_attribute(Attribute::Bold),
                    Cell::new(&result.item.source_name),
                    Cell::new(result.item.content_type.to_string()),
                    Cell::new(format!("{:.0}%", result.final_educational_score * 100.0)),
                    Cell::new(truncate(&result.item.url, 60)),
                ]);
            }
            println!("{table}");
            print_footer(outcome);
        }
        OutputFormat::Auto => unreachable!(),
    }

    Ok(())
}

fn print_footer(outcome: &SearchOutcome) {
    println!("{}", outcome.summary);
    if !outcome.sources_failed.is_empty() {
        let failed: Vec<&str> = outcome.sources_failed.iter().map(String::as_str).collect();
        println!("Unavailable sources: {}", failed.join(", "));
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_search_defaults() {
        let cli = Cli::parse_from(["edu-search", "search", "frações"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert_eq!(cli.output, OutputFormat::Auto);
        assert_eq!(cli.timeout, None);
        match cli.command {
            Commands::Search { query, sources } => {
                assert_eq!(query, "frações");
                assert!(sources.is_empty());
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_sources_list() {
        let cli = Cli::parse_from([
            "edu-search",
            "search",
            "derivada",
            "--sources",
            "wikipedia,so_matematica",
            "--timeout",
            "3",
            "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.timeout, Some(3));
        match cli.command {
            Commands::Search { sources, .. } => {
                assert_eq!(sources, vec!["wikipedia", "so_matematica"]);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_sources_command() {
        let cli = Cli::parse_from(["edu-search", "sources", "-o", "json"]);
        assert!(matches!(cli.command, Commands::Sources));
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("equações diferenciais", 10), "equaçõe...");
    }
}
