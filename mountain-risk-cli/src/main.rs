//! Binary crate for the `mountain-risk` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive prompts for location and credentials
//! - Human-friendly output formatting

use clap::Parser;

mod cli;
mod interactive;
mod logging;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    logging::init(cmd.verbose)?;

    if let Err(err) = cmd.run().await {
        eprintln!("{}", render::error_message(&err));
        std::process::exit(1);
    }

    Ok(())
}
