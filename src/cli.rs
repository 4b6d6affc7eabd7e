//! CLI definitions for PageLens.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// PageLens CLI.
#[derive(Parser)]
#[command(name = "pagelens")]
#[command(about = "Load a web page and chat with its content through an LLM")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (optional; defaults apply when missing)
    #[arg(short, long, default_value = "pagelens.toml", global = true)]
    pub config: PathBuf,

    /// How pages are fetched
    #[arg(long, value_enum, default_value_t = FetcherKind::Browser, global = true)]
    pub fetcher: FetcherKind,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum FetcherKind {
    /// Render with headless Chrome
    Browser,
    /// Plain HTTP GET, no JavaScript
    Http,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Interactive chat session (default)
    Chat {
        /// Page to load before the first prompt
        #[arg(long)]
        url: Option<String>,
    },

    /// Load a page, answer one question, and exit
    Ask {
        #[arg(long)]
        url: String,

        #[arg(long)]
        query: String,
    },

    /// Print the cleaned text of a local HTML file
    Clean {
        /// HTML file, or `-` for stdin
        input: PathBuf,
    },
}
