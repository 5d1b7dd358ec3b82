//! indexpush CLI - notify search engines about published pages
//!
//! Entry point for the `indexpush` command. Exit codes are documented in
//! [`error`].

use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod error;
mod output;
mod utils;

use cli::Cli;
use error::exit_code_from_error;
use utils::logging::initialize_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = initialize_logging(&cli) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match commands::execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code_from_error(&err))
        },
    }
}
