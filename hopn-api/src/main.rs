use anyhow::Context;
use hopn_api::{app, AppState};
use hopn_core::auth::{unlock_saved_session, MockBiometrics};
use hopn_core::payment::MockPaymentAdapter;
use hopn_fare::{MockBookingSubmitter, QuoteGenerator};
use hopn_store::{Config, FileSessionStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hopn_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting hop'n API on port {}", config.server.port);

    // Restore the operator session saved by a previous run, if any
    let sessions = FileSessionStore::new(config.session.dir.clone());
    let biometrics = MockBiometrics {
        available: false,
        accept: false,
    };
    match unlock_saved_session(&sessions, &biometrics).await {
        Ok(Some(auth)) => tracing::info!("Signed in as {} (token {})", auth.user.display_name(), auth.token),
        Ok(None) => tracing::info!("No saved session in {}", sessions.dir().display()),
        Err(e) => tracing::warn!("Saved session could not be restored: {}", e),
    }

    let app_state = AppState::new(
        QuoteGenerator::new(config.fares.clone()),
        Arc::new(MockBookingSubmitter::new()),
        Arc::new(MockPaymentAdapter::new()),
    );

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
