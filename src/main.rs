//! PageLens - chat with the content of a web page.
//!
//! Main entry point for the PageLens CLI.

mod app;
mod cli;
mod repl;

use std::error::Error;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing::{error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pagelens_config::pagelens_dir;
use pagelens_protocols::TextExtractor;
use pagelens_tools_web::HtmlCleaner;

use crate::cli::{Cli, Commands, FetcherKind};

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.pagelens/logs/ with daily rotation.
fn init_tracing() -> Result<(), Box<dyn Error>> {
    let log_dir = pagelens_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("pagelens")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The worker flushes until the guard drops, so keep it for the whole run.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        // Console layer on stderr so stdout carries only answers
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Chat { url: None }) {
        Commands::Chat { url } => run_chat(&cli.config, cli.fetcher, url).await?,
        Commands::Ask { url, query } => {
            return run_ask(&cli.config, cli.fetcher, &url, &query).await;
        }
        Commands::Clean { input } => run_clean(&input).await?,
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_chat(
    config_path: &Path,
    fetcher: FetcherKind,
    url: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let config = app::load_config(config_path)?;
    let source = app::build_source(fetcher, &config)?;

    let analyzer = match app::build_analyzer(&config).await {
        Ok(analyzer) => Some(analyzer),
        Err(e) => {
            error!("Failed to initialize ContentAnalyzer: {}", e);
            eprintln!(
                "🚨 Fatal Error: Could not initialize the AI Analyzer. Please check logs and API key setup. Error: {e}"
            );
            None
        }
    };

    let orchestrator = app::build_orchestrator(source, analyzer);
    repl::run_chat(orchestrator, config.session.preview_chars, url).await
}

async fn run_ask(
    config_path: &Path,
    fetcher: FetcherKind,
    url: &str,
    query: &str,
) -> Result<ExitCode, Box<dyn Error>> {
    let config = app::load_config(config_path)?;
    let source = app::build_source(fetcher, &config)?;
    let analyzer = app::build_analyzer(&config).await?;
    let mut orchestrator = app::build_orchestrator(source, Some(analyzer));

    let answer = match orchestrator.load_url(url).await {
        Ok(outcome) => {
            repl::print_load_outcome(&outcome);
            orchestrator.ask(query).await
        }
        Err(e) => Err(e),
    };

    match answer {
        Ok(answer) => {
            info!("Answer length: {} chars", answer.chars().count());
            println!("{answer}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("One-shot ask failed: {}", e);
            eprintln!("{}", repl::describe_error(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_clean(input: &Path) -> Result<(), Box<dyn Error>> {
    let html = if input == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        buf
    } else {
        tokio::fs::read_to_string(input).await?
    };

    let text = HtmlCleaner.extract_text(&html);
    if text.is_empty() {
        eprintln!("⚠️ No text found after cleaning.");
    } else {
        println!("{text}");
    }
    Ok(())
}
