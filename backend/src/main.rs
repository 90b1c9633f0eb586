use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use integraupt_server::application::ports::UserRepository;
use integraupt_server::infrastructure::config::Settings;
use integraupt_server::infrastructure::driven::{self, AesGcmCipher, InMemoryUserRepository, PostgresUserRepository};
use integraupt_server::infrastructure::driving::router;
use integraupt_server::infrastructure::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load()?;
    tracing::info!(
        host = %settings.server.host,
        port = settings.server.port,
        "IntegraUPT auth server starting"
    );

    let cipher = AesGcmCipher::from_base64_key(&settings.crypto.secret_key)
        .context("Invalid crypto.secret_key")?;

    let user_repo: Arc<dyn UserRepository> = match &settings.database.url {
        Some(url) => {
            let pool = driven::persistence::connect(url, &settings.database).await?;
            tracing::info!("connected to Postgres, migrations applied");
            Arc::new(PostgresUserRepository::new(pool))
        }
        None => {
            tracing::warn!("no database.url configured, users are kept in memory and lost on exit");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    let state = AppState {
        user_repo,
        cipher: Arc::new(cipher),
    };

    let app = router(state, &settings.cors.allowed_origins);

    let addr = settings.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
