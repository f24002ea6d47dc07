//! crlint - change-request review diagnostics
//!
//! Host adapter for the crlint rule engine. Reads change-request facts from a
//! JSON document, reads file content from a local checkout, and prints the
//! resulting diagnostics to stdout; logs go to stderr. Findings never fail
//! the command.
//!
//! ## Commands
//!
//! - `check`: evaluate a change request and print its diagnostics

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, Level};

use crlint_core::{
    ChangeFacts, EngineConfig, EvaluationReport, FsContentFetcher, MemorySink, RuleEngine,
};

#[derive(Parser)]
#[command(name = "crlint")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Review diagnostics for a single change request", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a change request and print its diagnostics
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Path to the change-request facts document (JSON)
    #[arg(short, long, env = "CRLINT_FACTS")]
    facts: PathBuf,

    /// Checkout root used to read file content
    #[arg(short, long, env = "CRLINT_ROOT", default_value = ".")]
    root: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,

    /// Flag change requests touching more files than this
    #[arg(long, env = "CRLINT_BIG_THRESHOLD")]
    big_threshold: Option<u64>,

    /// Flag commit titles longer than this many characters
    #[arg(long, env = "CRLINT_LONG_TITLE")]
    long_title: Option<usize>,
}

impl CheckArgs {
    fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default();
        if let Some(n) = self.big_threshold {
            config.big_change_threshold = n;
        }
        if let Some(n) = self.long_title {
            config.long_title_threshold = n;
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    crlint_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Check(args) => {
            let output = cmd_check(&args).await?;
            print!("{output}");
            Ok(())
        }
    }
}

async fn load_facts(path: &Path) -> Result<ChangeFacts> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read facts from {}", path.display()))?;
    ChangeFacts::from_json_str(&raw)
        .with_context(|| format!("Failed to parse facts in {}", path.display()))
}

async fn cmd_check(args: &CheckArgs) -> Result<String> {
    let facts = load_facts(&args.facts).await?;

    let fetcher = Arc::new(FsContentFetcher::new(&args.root));
    let engine = RuleEngine::new(args.engine_config(), fetcher);
    let sink = MemorySink::new();
    let summary = engine.evaluate(&facts, &sink).await;

    info!(
        run_id = %summary.run_id,
        flags = summary.flags,
        notes = summary.notes,
        explains = summary.explains,
        "Change request evaluated"
    );
    let report = EvaluationReport::new(summary, sink.into_diagnostics());

    let output = match args.format {
        OutputFormat::Markdown => report.render_markdown(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&report)?;
            json.push('\n');
            json
        }
    };
    Ok(output)
}
