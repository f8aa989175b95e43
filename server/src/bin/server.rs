//! Party RSVP HTTP server.
//!
//! # Usage
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/party_rsvp cargo run --bin server
//! ```

use party_rsvp_auth::stores::{PostgresAdminRepository, PostgresSessionStore};
use party_rsvp_core::{Clock, SystemClock};
use party_rsvp_postgres::PostgresStore;
use party_rsvp_server::{AppState, AuthStores, Config, Stores, build_router, telemetry};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,party_rsvp=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting party RSVP server");

    let config = Config::from_env()?;
    info!(
        host = %config.server.host,
        port = config.server.port,
        frontend_origin = %config.server.frontend_origin,
        invite_name_matching = %config.rsvp.invite_name_matching,
        require_phone = config.rsvp.require_phone,
        "Configuration loaded"
    );

    let pool = party_rsvp_postgres::connect(&config.postgres.pool_config()).await?;
    party_rsvp_postgres::migrate(&pool).await?;

    let prometheus = match telemetry::install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(error = %e, "Prometheus recorder not installed");
            None
        }
    };

    let store = Arc::new(PostgresStore::new(pool.clone()));
    let auth = AuthStores {
        admins: Arc::new(PostgresAdminRepository::new(pool.clone())),
        sessions: Arc::new(PostgresSessionStore::new(pool.clone())),
    };
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let state = AppState::new(Stores::shared(&store), auth, clock, &config, prometheus);

    spawn_session_purge(state.clone());

    let app = build_router(state, &config.server);
    let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
    info!(address = %listener.local_addr()?, "Listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(());
    let mut drain_rx = shutdown_rx.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(());
    });

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        let _ = shutdown_rx.changed().await;
    })
    .into_future();
    tokio::pin!(server);

    let drain_timeout = Duration::from_secs(config.server.shutdown_timeout);
    tokio::select! {
        result = &mut server => result?,
        () = async {
            let _ = drain_rx.changed().await;
            tokio::time::sleep(drain_timeout).await;
        } => warn!(timeout_secs = config.server.shutdown_timeout, "Graceful shutdown timed out"),
    }

    pool.close().await;
    info!("Shutdown complete");
    Ok(())
}

fn spawn_session_purge(state: AppState) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            match state.authenticator.purge_expired().await {
                Ok(0) => {}
                Ok(purged) => info!(purged, "Expired admin sessions purged"),
                Err(e) => warn!(error = %e, "Session purge failed"),
            }
        }
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Ctrl+C handler failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutting down gracefully...");
}
