use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use merch_shop::catalog::source::HttpProductSource;
use merch_shop::checkout::gateway::HttpPaymentGateway;
use merch_shop::config::Config;
use merch_shop::router::create_app_router;
use merch_shop::state::AppState;

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load();
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    // Wire the real collaborators; tests swap these for fakes.
    let source = Arc::new(HttpProductSource::new(config.catalog_url.clone()));
    let gateway = Arc::new(HttpPaymentGateway::new(config.checkout_url.clone()));

    let state = Arc::new(AppState::new(config, source, gateway));
    let app = create_app_router(state.clone());

    info!("Server running on http://{}", addr);
    let listener = TcpListener::bind(addr).await.unwrap();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    // Cancel the catalog fetch and any pending feedback timers before exit.
    state.shutdown();
    info!("Server shut down");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
