use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use brook::app::{AppContext, Result};
use brook::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stderr keeps log lines out of the alternate screen
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    run(cli).await.map_err(|err| {
        tracing::debug!(error = ?err, "command failed");
        anyhow::anyhow!(err.guidance())
    })
}

async fn run(cli: Cli) -> Result<()> {
    let ctx = AppContext::new(cli.config.as_deref())?;

    match cli.command {
        Commands::Authenticate { email, password } => {
            commands::authenticate(&ctx, &email, &password).await?;
        }
        Commands::Stats => {
            commands::stats(&ctx).await?;
        }
        Commands::Unread => {
            commands::unread(&ctx).await?;
        }
    }

    Ok(())
}
