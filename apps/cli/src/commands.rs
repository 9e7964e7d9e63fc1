//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use tracing::info;

use pressroom_components::{ComponentFactory, UuidSource};
use pressroom_content::Content;
use pressroom_core::assembler;
use pressroom_core::exporter::{self, ExportOptions};
use pressroom_shared::{AppConfig, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Pressroom — turn content documents into Apple News articles.
#[derive(Parser)]
#[command(
    name = "pressroom",
    version,
    about = "Convert structured content documents into Apple News Format article bundles.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Export a content document as an article bundle.
    Export {
        /// Path to the content document (JSON).
        content: PathBuf,

        /// Output directory for article bundles (defaults to var/articles).
        #[arg(short, long)]
        out: Option<String>,

        /// Article language tag (overrides config).
        #[arg(short, long)]
        language: Option<String>,

        /// Write compact JSON instead of pretty-printed.
        #[arg(long)]
        compact: bool,
    },

    /// Print the component breakdown of a content document without writing.
    Inspect {
        /// Path to the content document (JSON).
        content: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "pressroom=info",
        1 => "pressroom=debug",
        _ => "pressroom=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Export {
            content,
            out,
            language,
            compact,
        } => cmd_export(&content, out.as_deref(), language.as_deref(), compact),
        Command::Inspect { content } => cmd_inspect(&content),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_export(
    content_path: &Path,
    out: Option<&str>,
    language: Option<&str>,
    compact: bool,
) -> Result<()> {
    let config = load_config()?;
    let content = read_content(content_path)?;

    // Determine output root: flag > <cwd>/var/articles
    let output_root = match out {
        Some(path) => PathBuf::from(path),
        None => {
            let cwd = std::env::current_dir()
                .map_err(|e| eyre!("cannot determine working directory: {e}"))?;
            cwd.join("var").join("articles")
        }
    };

    let options = ExportOptions {
        output_root,
        language: language
            .map(String::from)
            .unwrap_or_else(|| config.defaults.language.clone()),
        layout: config.layout.clone(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        pretty: !compact && config.defaults.pretty,
    };

    info!(
        content = %content_path.display(),
        id = %content.id,
        "exporting article"
    );

    let result = exporter::export_article(&content, &options)?;

    println!();
    println!("  Article exported successfully!");
    println!("  ID:         {}", content.id);
    println!("  Components: {}", result.component_count);
    println!("  Path:       {}", result.article_path.display());
    println!();

    Ok(())
}

fn cmd_inspect(content_path: &Path) -> Result<()> {
    let content = read_content(content_path)?;

    let factory = ComponentFactory::new();
    let components = assembler::assemble(&content, &factory, &UuidSource);
    let metadata = pressroom_core::metadata::build_metadata(&content);

    println!("Article: {}", content.id);
    println!("Components ({}):", components.len());
    for (index, component) in components.iter().enumerate() {
        let role = component["role"].as_str().unwrap_or("?");
        let anchored = if component.get("anchor").is_some() {
            "  (anchored)"
        } else {
            ""
        };
        println!("  {index:>3}  {role}{anchored}");
    }

    if !metadata.is_empty() {
        println!("Metadata:");
        for (key, value) in &metadata {
            println!("  {key}: {value}");
        }
    }

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_content(path: &Path) -> Result<Content> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| eyre!("cannot read content document '{}': {e}", path.display()))?;
    serde_json::from_str(&raw)
        .map_err(|e| eyre!("invalid content document '{}': {e}", path.display()))
}
