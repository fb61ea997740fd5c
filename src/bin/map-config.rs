//! Map Config CLI Binary
//!
//! Command-line interface for resolving per-language map configuration.

use clap::Parser;
use map_config::logging::init_logging;
use map_config::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Create CLI context
    let context = match CliContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(Some(&context.settings().logging)) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    // Execute command
    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
