//! Daybook CLI - a journaling calendar for the terminal
//!
//! This is the command-line interface for Daybook. It provides a user-friendly
//! interface to the core library functionality.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use daybook_core::VERSION;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{calendar, cards, dates, entries, init, misc, years};
use crate::constants::LOG_ENV;
use crate::errors::exit_code_for;
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        // Get UI context for error formatting
        let ui_ctx = ctx.ui_context(false);

        // Split an embedded hint off the message, or derive one
        let error_msg = format!("{}", e);
        let (message, hint) = match error_msg.find("\nHint:") {
            Some(idx) => (
                error_msg[..idx].to_string(),
                Some(error_msg[idx + 1..].to_string()),
            ),
            None => (error_msg.clone(), extract_error_hint(&error_msg)),
        };

        print_error(&ui_ctx, &message, hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

/// Log to stderr. The filter comes from `DAYBOOK_LOG`, then `RUST_LOG`;
/// `--verbose` defaults it to debug.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Provide contextual hints for common error types.
fn extract_error_hint(error: &str) -> Option<String> {
    let error_lower = error.to_lowercase();

    if error_lower.contains("entry") && error_lower.contains("not found") {
        return Some("Hint: Run `daybook cards --no-input` to list entry IDs.".to_string());
    }

    if error_lower.contains("invalid date") {
        return Some(
            "Hint: Use YYYY-MM-DD. Signed years work too, e.g. -0043-03-15 for 44 BC."
                .to_string(),
        );
    }

    if error_lower.contains("rating") && error_lower.contains("outside") {
        return Some("Hint: Ratings run from 1.0 to 5.0.".to_string());
    }

    if error_lower.contains("failed to parse config") {
        return Some(
            "Hint: Fix the TOML or run `daybook init --force` to rewrite it.".to_string(),
        );
    }

    if error_lower.contains("data directory") || error_lower.contains("failed to write") {
        return Some(
            "Hint: Check that the data directory is writable, or pass --data-dir.".to_string(),
        );
    }

    None
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => {
            init::handle_init(ctx, args)?;
        }
        Some(Commands::Add(args)) => {
            entries::handle_add(ctx, args)?;
        }
        Some(Commands::Edit(args)) => {
            entries::handle_edit(ctx, args)?;
        }
        Some(Commands::Delete(args)) => {
            entries::handle_delete(ctx, args)?;
        }
        Some(Commands::Day(args)) => {
            entries::handle_day(ctx, args)?;
        }
        Some(Commands::Dates(args)) => {
            dates::handle_dates(ctx, args)?;
        }
        Some(Commands::Cards(args)) => {
            cards::handle_cards(ctx, args)?;
        }
        Some(Commands::Calendar(args)) => {
            calendar::handle_calendar(ctx, args)?;
        }
        Some(Commands::Years(args)) => {
            years::handle_years(ctx, args)?;
        }
        Some(Commands::Key(args)) => {
            misc::handle_key(ctx, args)?;
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args)?;
        }
        None => {
            println!("Daybook v{}", VERSION);
            println!("\nQuickstart:");
            println!("  daybook init");
            println!("  daybook add -m \"Walked to the lake\" -r 4.5 -c Outdoors");
            println!("  daybook day");
            println!("  daybook calendar");
            println!("  daybook cards");
            println!("\nRun `daybook --help` for full usage.");
        }
    }

    Ok(())
}
