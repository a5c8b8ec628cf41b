//! CareerPath API server entry point

use careerpath_service::{
    auth::tokens::TokenCodec,
    config::AppConfig,
    db,
    handlers::health,
    middleware::AppState,
    routes,
    services::{AiService, AuthService},
    telemetry,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("careerpath-service {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // Load .env files for development; production sets real environment
    // variables and skips these
    dotenv::from_filename(".env.local").ok();
    dotenv::dotenv().ok();

    health::mark_started();

    // Missing secrets or database URL fail here, before anything listens
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    telemetry::init_telemetry(&config);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "CareerPath service starting...");

    let db_pool = db::create_pool(&config.database).await?;
    db::run_migrations(&db_pool).await?;

    tracing::info!("Database initialized");

    tokio::fs::create_dir_all(&config.uploads.dir).await?;

    let tokens = Arc::new(TokenCodec::from_config(&config)?);

    let app_state = Arc::new(AppState {
        db: db_pool.clone(),
        tokens: tokens.clone(),
        auth_service: Arc::new(AuthService::new(db_pool, tokens)),
        ai: Arc::new(AiService::new(config.ai.clone())?),
        config: config.clone(),
    });

    let app = routes::create_router(app_state);

    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.graceful_shutdown_timeout_secs))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handling
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }

    tokio::time::sleep(tokio::time::Duration::from_secs(timeout_secs)).await;
    tracing::warn!("Graceful shutdown timeout reached, forcing exit");
}

fn print_help() {
    println!("careerpath-service {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: careerpath-service [options]");
    println!();
    println!("Options:");
    println!("  --version     Print version and exit");
    println!("  --help        Print this help and exit");
    println!();
    println!("Environment variables:");
    println!("  All configuration is environment-driven with the CAREERPATH_ prefix.");
    println!("  Required: CAREERPATH_DATABASE__URL,");
    println!("            CAREERPATH_SECURITY__ACCESS_TOKEN_SECRET,");
    println!("            CAREERPATH_SECURITY__REFRESH_TOKEN_SECRET");
}
