use eframe::egui;
use portal::{AuthClient, PortalApp, PortalConfig, SessionStore};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PortalConfig::from_env();
    tracing::info!(api_url = %config.api_url, session = %config.session_file.display(), "starting portal");

    // Network calls run here; the UI thread only polls for their results.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;

    let app = PortalApp::new(
        AuthClient::new(config.api_url),
        SessionStore::new(config.session_file),
        runtime.handle().clone(),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("IntegraUPT")
            .with_inner_size([420.0, 620.0]),
        ..Default::default()
    };
    eframe::run_native("IntegraUPT", options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("UI error: {}", e))?;

    Ok(())
}
