use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use fonttrim_cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    Builder::from_env(Env::default().default_filter_or(cli.log_filter())).init();
    cli.run()
}
