use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use aera_gateway::api::ApiServer;
use aera_gateway::Config;

/// Aera - voice search assistant gateway
#[derive(Parser)]
#[command(name = "aera", version, about)]
struct Cli {
    /// Port to listen on
    #[arg(long, env = "AERA_PORT")]
    port: Option<u16>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,aera_gateway=info",
        1 => "info,aera_gateway=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Missing SERP_API_KEY fails here, before anything binds
    let mut config = Config::load()?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    tracing::debug!(?config, "loaded configuration");

    tracing::info!(
        port = config.server.port,
        "starting aera gateway - open http://localhost:{} and click the mic",
        config.server.port
    );

    let server = ApiServer::from_config(&config)?;
    server.run().await?;

    Ok(())
}
