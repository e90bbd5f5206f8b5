/// Lumen Server - indoor media catalog
use clap::{Parser, Subcommand};
use lumen_server::{config::ServerConfig, create_router, services::MediaStore, state::AppState};
use lumen_storage::LocalStorageContext;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lumen-server")]
#[command(about = "Lumen indoor media catalog server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "LUMEN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lumen_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::Migrate => migrate(&config).await?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Lumen Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool = lumen_storage::create_pool(&config.storage.database_url).await?;
    lumen_storage::run_migrations(&pool).await?;
    let db = Arc::new(LocalStorageContext::new(pool));
    tracing::info!("Database connected");

    // Initialize media store
    let media_store = MediaStore::new(
        config.storage.media_path.clone(),
        config.storage.public_prefix.clone(),
    );
    media_store.initialize().await?;
    tracing::info!(
        "Media store at {} served under {}",
        media_store.base_path().display(),
        media_store.public_prefix()
    );

    let app_state = AppState::new(Arc::clone(&db), Arc::new(media_store));
    let app = create_router(app_state, config.storage.max_upload_bytes);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn migrate(config: &ServerConfig) -> anyhow::Result<()> {
    let pool = lumen_storage::create_pool(&config.storage.database_url).await?;
    lumen_storage::run_migrations(&pool).await?;
    pool.close().await;

    println!("Migrations applied to {}", config.storage.database_url);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
