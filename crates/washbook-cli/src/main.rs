//! Washbook CLI - local bookkeeping for a small car wash
//!
//! This is the command-line interface for Washbook. It records daily credit
//! and debit entries, shows daily and monthly history, and moves the ledger
//! in and out of JSON files.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::{CommandFactory, Parser};
use env_logger::Env;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{entries, maintenance, misc};
use crate::errors::exit_code_for;
use crate::ui::print_error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "error" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let ctx = AppContext::new(&cli);
    if let Err(e) = run(&ctx, &cli).await {
        let ui_ctx = ctx.ui_context();
        let error_msg = format!("{}", e);
        let (message, hint) = split_hint(&error_msg);
        print_error(&ui_ctx, message, hint);
        std::process::exit(exit_code_for(&e));
    }
}

/// Split a trailing "Hint: ..." line off an error message.
fn split_hint(error: &str) -> (&str, Option<&str>) {
    match error.find("\nHint:") {
        Some(idx) => (&error[..idx], Some(error[idx + 1..].trim_start_matches("Hint:").trim())),
        None => (error, None),
    }
}

async fn run(ctx: &AppContext<'_>, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Add(args)) => entries::handle_add(ctx, args).await,
        Some(Commands::Search(args)) => entries::handle_search(ctx, args),
        Some(Commands::History(args)) => entries::handle_history(ctx, args),
        Some(Commands::Show(args)) => entries::handle_show(ctx, args),
        Some(Commands::Edit(args)) => entries::handle_edit(ctx, args).await,
        Some(Commands::Delete(args)) => entries::handle_delete(ctx, args).await,
        Some(Commands::Export(args)) => maintenance::handle_export(ctx, args),
        Some(Commands::Import(args)) => maintenance::handle_import(ctx, args).await,
        Some(Commands::Check) => maintenance::handle_check(ctx),
        Some(Commands::Completions(args)) => misc::handle_completions(args),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
