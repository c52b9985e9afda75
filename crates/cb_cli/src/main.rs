use clap::Parser;

mod cli;
mod config;
mod logging;

use config::{Cli, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let settings = Settings::from_cli(&cli)?;
    cli::handle_command(cli.command, &settings).await?;
    Ok(())
}
