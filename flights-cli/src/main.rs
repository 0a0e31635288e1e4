//! Binary crate for the `flights` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Setting up logging
//! - Printing the airport board

use clap::Parser;

mod cli;
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cmd = cli::Cli::parse();
    cmd.run().await
}
