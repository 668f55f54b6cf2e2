use clap::{Parser, ValueEnum};
use forgebridge::application::dispatch::Dispatcher;
use forgebridge::application::{registry, stdio};
use forgebridge::application::session::SessionManager;
use forgebridge::config::{self, AppConfig};
use forgebridge::infrastructure::backend::HttpConnector;
use forgebridge::infrastructure::server;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(
    name = "forgebridge",
    version,
    about = "Schema-validated tool server for an issue-tracking/CI backend"
)]
struct Cli {
    #[arg(long, value_enum, default_value_t = RunMode::Stdio)]
    mode: RunMode,
    #[arg(long, default_value = "127.0.0.1:8080")]
    rest_addr: SocketAddr,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RunMode {
    Stdio,
    Rest,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let _ = dotenvy::dotenv();
    info!("starting forgebridge");

    let cli = Cli::parse();
    debug!(?cli.mode, "CLI arguments parsed");

    let app_config = AppConfig::from_env();
    let sessions = Arc::new(SessionManager::new(
        Arc::new(HttpConnector),
        app_config.credential.clone(),
    ));
    let dispatcher = Arc::new(Dispatcher::new(registry::catalog(), sessions));

    match cli.mode {
        RunMode::Stdio => {
            // The single-peer transport has no credential-update channel of
            // its own beyond the set_credentials tool, so refuse to start
            // without configuration rather than answer every request with
            // NotConnected.
            if app_config.credential.is_none() {
                return Err(format!(
                    "backend credentials required for stdio mode: set {} and {}",
                    config::ENDPOINT_VAR,
                    config::TOKEN_VAR
                )
                .into());
            }
            info!("entering STDIO mode; awaiting JSON line requests");
            stdio::run(dispatcher).await?;
        }
        RunMode::Rest => {
            info!(addr = %cli.rest_addr, "starting REST server");
            server::serve(dispatcher, cli.rest_addr).await?;
        }
    }

    info!("forgebridge exiting");
    Ok(())
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        // Logs go to stderr so the stdio transport keeps stdout for
        // protocol frames.
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .init();
    });
}
