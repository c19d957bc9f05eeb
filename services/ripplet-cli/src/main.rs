mod cli;
mod commands;
mod config;

use clap::Parser;
use cli::{Cli, Command};
use config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.data_dir);
    let mut out = std::io::stdout().lock();

    match cli.command {
        Command::Networks => commands::networks(&mut out),
        Command::Build(args) => commands::build(args, &mut out),
        command if cli.ephemeral => commands::run_with_store(&commands::ephemeral_store(), command, &mut out).await,
        command => commands::run_with_store(&commands::open_store(&config)?, command, &mut out).await,
    }
}
