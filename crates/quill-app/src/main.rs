mod app_state;
mod cli;
mod init;

use std::io::Write;

use quill_common::Action;
use quill_config::{LogLevel, QuillConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::app_state::{Flow, QuillApp};

/// `RUST_LOG` as the base, with each comma-separated directive from the CLI
/// or config layered on top so it wins for the targets it names. Returns the
/// parts that failed to parse.
fn log_filter(directives: &str) -> (EnvFilter, Vec<String>) {
    let mut filter = EnvFilter::from_default_env();
    let mut applied = 0;
    let mut rejected = Vec::new();

    for part in directives.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.parse::<Directive>() {
            Ok(directive) => {
                filter = filter.add_directive(directive);
                applied += 1;
            }
            Err(_) => rejected.push(part.to_string()),
        }
    }

    if applied == 0 {
        for part in LogLevel::Info.directive().split(',') {
            if let Ok(directive) = part.parse::<Directive>() {
                filter = filter.add_directive(directive);
            }
        }
    }
    (filter, rejected)
}

fn print_lines(lines: Vec<String>) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

fn print_prompt(prompt: &str) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    write!(out, "{prompt}")?;
    out.flush()
}

#[tokio::main]
async fn main() {
    // Load .env before the credential is read
    let dotenv = dotenvy::dotenv();

    let args = cli::parse();

    // Config first so its log level can drive the subscriber
    let (config, config_error) = match quill_config::load_config(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (QuillConfig::default(), Some(e)),
    };

    let directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.directive().to_string());
    let (filter, rejected) = log_filter(&directive);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Quill v{} starting...", env!("CARGO_PKG_VERSION"));
    for part in rejected {
        tracing::warn!("Ignoring invalid log directive: {part}");
    }
    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Failed to load .env: {e}"),
    }
    if let Some(e) = config_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    // Surface a missing credential now rather than on the first message
    let (driver, startup_error) = match init::build_driver(&config.api) {
        Ok(driver) => {
            tracing::info!(model = driver.model(), "Completion client ready");
            (Some(driver), None)
        }
        Err(e) => {
            tracing::error!("Completion client unavailable: {e}");
            (None, Some(e.to_string()))
        }
    };

    let mut app = QuillApp::new(&config, args.tool, driver, startup_error);
    let tool = app.tool();
    tracing::info!(%tool, "Entering input loop");

    // Initial screen: tool header and its (empty) chat list
    app.dispatch(Action::SelectTool(tool)).await;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if let Err(e) = print_lines(app.take_output()).and_then(|()| print_prompt(&app.prompt()))
        {
            tracing::error!("Failed to write output: {e}");
            break;
        }

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read input: {e}");
                break;
            }
        };

        if app.handle_line(&line).await == Flow::Quit {
            break;
        }
    }

    if let Err(e) = print_lines(app.take_output()) {
        tracing::warn!("Failed to flush output: {e}");
    }
    tracing::info!("Shutdown complete");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_applies_valid_parts_and_reports_the_rest() {
        let (filter, rejected) = log_filter("quill=debug, quill_ai=verbose ,quill_config=warn");
        assert_eq!(rejected, vec!["quill_ai=verbose".to_string()]);
        let shown = filter.to_string();
        assert!(shown.contains("quill=debug"));
        assert!(shown.contains("quill_config=warn"));
    }

    #[test]
    fn log_filter_falls_back_to_info() {
        let (filter, rejected) = log_filter("quill=loud");
        assert_eq!(rejected.len(), 1);
        assert!(filter.to_string().contains("quill=info"));
    }
}
