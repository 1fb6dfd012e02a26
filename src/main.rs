//! `claude-docs` — unified CLI for Claude Code documentation management.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
