use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{eyre, Result, WrapErr};
use scout_core::{
    Config, FirecrawlClient, Provider, ResearchState, ResearchWorkflow, SearchProvider,
    WorkflowError, LLM,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "scout")]
#[command(about = "Research and compare developer tools", long_about = None)]
struct Cli {
    /// What to research, e.g. "vector databases". Omit for interactive mode.
    query: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Path to a config file (defaults to ./scout.toml, then the user config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// More log output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Markdown,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .wrap_err_with(|| format!("loading config from {}", path.display()))?,
        None => Config::load().wrap_err("loading config")?,
    };

    // Search credentials are checked first so nothing is built without them.
    let search = FirecrawlClient::from_config(&config.search)
        .wrap_err("set FIRECRAWL_API_KEY or SCOUT_SEARCH_API_KEY")?;
    let llm = Provider::build_from_config(&config.llm).wrap_err("building LLM client")?;
    debug!(
        provider = %config.llm.provider,
        model = %config.llm.model_or_default(),
        "clients ready"
    );

    let workflow = ResearchWorkflow::new(llm, search, config.pipeline);

    if cli.query.is_empty() {
        interactive(&workflow, cli.format).await
    } else {
        research(&workflow, &cli.query.join(" "), cli.format).await
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("scout_core={level},scout={level},warn").into()
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn interactive<L: LLM, S: SearchProvider>(
    workflow: &ResearchWorkflow<L, S>,
    format: Format,
) -> Result<()> {
    println!("Developer Tools Research Agent");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"\nDeveloper Tools Query: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();
        if matches!(query.to_lowercase().as_str(), "quit" | "exit") {
            break;
        }
        if query.is_empty() {
            continue;
        }

        // A failed run should not end the session.
        if let Err(e) = research(workflow, query, format).await {
            eprintln!("Error: {e:#}");
        }
    }

    Ok(())
}

async fn research<L: LLM, S: SearchProvider>(
    workflow: &ResearchWorkflow<L, S>,
    query: &str,
    format: Format,
) -> Result<()> {
    match workflow.run(query).await {
        Ok(state) => print_state(&state, format),
        Err(e @ WorkflowError::AnalysisUnavailable { .. }) => {
            info!("printing partial results");
            print_state(e.partial_state(), format)?;
            Err(eyre!(e))
        }
    }
}

fn print_state(state: &ResearchState, format: Format) -> Result<()> {
    match format {
        Format::Markdown => println!("{}", state.to_markdown()),
        Format::Json => println!("{}", serde_json::to_string_pretty(state)?),
    }
    Ok(())
}
