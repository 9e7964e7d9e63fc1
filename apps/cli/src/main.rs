//! Pressroom CLI — Apple News article exporter.
//!
//! Converts structured content documents into Apple News Format
//! article bundles.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
