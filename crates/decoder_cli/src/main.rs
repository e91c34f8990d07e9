mod cli;
mod run;
mod settings;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    run::run(cli::Cli::parse())
}
