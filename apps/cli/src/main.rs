//! stepdoc CLI — compile step-by-step tutorial directories into markdown.
//!
//! Each positional argument is a step directory, in display order. The
//! `overview` directory supplies the tutorial title and the index page.

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
