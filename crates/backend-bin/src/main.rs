use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use backend_lib::{config::Settings, router, storage, telemetry, AppState};
use clap::{ArgAction, Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

/// Email-keyed accounts and bearer-token login service
#[derive(Parser, Debug)]
#[command(name = "accountsd", version, about)]
struct Cli {
    /// Config file (defaults to ./accounts.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Create an account with staff and superuser privileges
    CreateSuperuser {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ACCOUNTS_SUPERUSER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Activate or deactivate an account
    SetActive {
        #[arg(long)]
        email: String,
        #[arg(long, action = ArgAction::Set)]
        active: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    telemetry::init_tracing(&settings)?;

    let storage = storage::open(&settings.storage)
        .await
        .context("opening storage")?;
    let state = Arc::new(AppState::new(storage, settings)?);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(state).await,
        Command::CreateSuperuser { email, password } => {
            let account = state.accounts.create_superuser(&email, password).await?;
            info!(email = %account.email, "superuser created");
            Ok(())
        },
        Command::SetActive { email, active } => {
            let account = state.accounts.set_active(&email, active).await?;
            info!(email = %account.email, active = account.is_active, "account updated");
            Ok(())
        },
    }
}

async fn serve<S: backend_lib::storage::Storage + Clone + 'static>(
    state: Arc<AppState<S>>,
) -> anyhow::Result<()> {
    let addr = state.settings.server.bind_addr()?;
    let app = router::create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
    info!("shutting down");
}
