//! Interactive chat loop.

use std::error::Error;
use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use pagelens_core::{LoadOutcome, Orchestrator, SessionError, WARNING_MARKER};
use pagelens_protocols::ChatRole;

const HELP: &str = "\
Commands:
  /load <url>   Fetch and clean a page (resets the conversation)
  /preview      Show the start of the cleaned text
  /history      Show the conversation so far
  /status       Show what is loaded
  /help         Show this help
  /quit         Exit
Anything else is sent as a question about the loaded page.";

/// One line of REPL input.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ReplCommand {
    Load(String),
    Preview,
    History,
    Status,
    Help,
    Quit,
    Query(String),
    Empty,
    Unknown(String),
}

impl ReplCommand {
    pub(crate) fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ReplCommand::Empty;
        }
        let Some(command) = line.strip_prefix('/') else {
            return ReplCommand::Query(line.to_string());
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match name {
            "load" => ReplCommand::Load(arg.to_string()),
            "preview" => ReplCommand::Preview,
            "history" => ReplCommand::History,
            "status" => ReplCommand::Status,
            "help" | "?" => ReplCommand::Help,
            "quit" | "exit" | "q" => ReplCommand::Quit,
            other => ReplCommand::Unknown(other.to_string()),
        }
    }
}

pub(crate) async fn run_chat(
    mut orchestrator: Orchestrator,
    preview_chars: usize,
    initial_url: Option<String>,
) -> Result<(), Box<dyn Error>> {
    println!("PageLens - chat with a web page. Type /help for commands.");
    if !orchestrator.analyzer_ready() {
        println!("🚨 Analyzer initialization failed. Pages can be loaded, but questions are disabled.");
    }

    if let Some(url) = initial_url {
        load(&mut orchestrator, &url).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&orchestrator)?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = ReplCommand::parse(&line);
        debug!("REPL command: {:?}", command);

        match command {
            ReplCommand::Empty => {}
            ReplCommand::Quit => break,
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Load(url) => load(&mut orchestrator, &url).await,
            ReplCommand::Preview => match orchestrator.preview(preview_chars) {
                Some(text) => println!("{text}"),
                None => println!("No website content loaded yet."),
            },
            ReplCommand::History => {
                let history = orchestrator.session().history();
                if history.is_empty() {
                    println!("No messages yet.");
                }
                for message in history {
                    println!("{}: {}\n", message.role.label(), message.text);
                }
            }
            ReplCommand::Status => print_status(&orchestrator),
            ReplCommand::Query(query) => {
                println!("🧠 Analyzing...");
                match orchestrator.ask(&query).await {
                    Ok(answer) => println!("\n{}: {}\n", ChatRole::Assistant.label(), answer),
                    Err(err) => println!("{}", describe_error(&err)),
                }
            }
            ReplCommand::Unknown(name) => println!("Unknown command /{name}. Type /help."),
        }
    }

    Ok(())
}

fn prompt(orchestrator: &Orchestrator) -> std::io::Result<()> {
    let placeholder = if orchestrator.analyzer_ready() && orchestrator.session().is_loaded() {
        "ask"
    } else {
        "load a website first"
    };
    print!("[{placeholder}] > ");
    std::io::stdout().flush()
}

async fn load(orchestrator: &mut Orchestrator, url: &str) {
    println!("Scraping and cleaning {}...", url.trim());
    match orchestrator.load_url(url).await {
        Ok(outcome) => print_load_outcome(&outcome),
        Err(err) => println!("{}", describe_error(&err)),
    }
}

/// User-facing text for a failed action, always led by the warning marker.
pub(crate) fn describe_error(err: &SessionError) -> String {
    let text = err.to_string();
    if text.starts_with(WARNING_MARKER) {
        text
    } else {
        format!("{WARNING_MARKER} {text}")
    }
}

pub(crate) fn print_load_outcome(outcome: &LoadOutcome) {
    if outcome.is_empty() {
        println!(
            "⚠️ Content loaded, but it appears empty after cleaning. The page might be dynamic or lack text."
        );
    } else {
        println!("✅ Website content loaded and cleaned!");
        println!("Cleaned text length: {} chars", outcome.content_chars);
    }
}

fn print_status(orchestrator: &Orchestrator) {
    let status = orchestrator.status();
    match status.url {
        Some(url) => {
            println!("Content loaded from: {url}");
            println!("Cleaned text length: {} chars", status.content_chars);
            println!("Messages: {}", status.messages);
        }
        None => println!("No website content loaded yet."),
    }
    if !orchestrator.analyzer_ready() {
        println!("Analyzer: unavailable");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagelens_core::AnalysisError;
    use pagelens_protocols::ScrapeError;

    #[test]
    fn test_parse_query() {
        assert_eq!(
            ReplCommand::parse("  What is this page about? "),
            ReplCommand::Query("What is this page about?".to_string())
        );
    }

    #[test]
    fn test_parse_load() {
        assert_eq!(
            ReplCommand::parse("/load   https://example.com "),
            ReplCommand::Load("https://example.com".to_string())
        );
        assert_eq!(ReplCommand::parse("/load"), ReplCommand::Load(String::new()));
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(ReplCommand::parse("/preview"), ReplCommand::Preview);
        assert_eq!(ReplCommand::parse("/history"), ReplCommand::History);
        assert_eq!(ReplCommand::parse("/status"), ReplCommand::Status);
        assert_eq!(ReplCommand::parse("/help"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/quit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/exit"), ReplCommand::Quit);
    }

    #[test]
    fn test_parse_empty_and_unknown() {
        assert_eq!(ReplCommand::parse("   "), ReplCommand::Empty);
        assert_eq!(
            ReplCommand::parse("/frobnicate now"),
            ReplCommand::Unknown("frobnicate".to_string())
        );
    }

    #[test]
    fn test_describe_error_keeps_analysis_text() {
        let err = SessionError::from(AnalysisError::QuotaExhausted("429".to_string()));
        assert_eq!(
            describe_error(&err),
            "⚠️ API Error: Resource limits exceeded. Please check your API quota. (429)"
        );
    }

    #[test]
    fn test_describe_error_marks_session_failures() {
        assert_eq!(describe_error(&SessionError::EmptyUrl), "⚠️ Please enter a URL.");
        let scrape = SessionError::from(ScrapeError::DriverUnavailable("no chrome".to_string()));
        let text = describe_error(&scrape);
        assert!(text.starts_with("⚠️ Scraping Error:"), "{text}");
    }
}
