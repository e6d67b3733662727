//! Binary entrypoint for the view-counter HTTP server.
//!
//! Configuration comes from environment variables; the `config` module has
//! the full list and defaults. A misconfigured backend does not abort
//! startup: the server binds anyway and reports the problem on every
//! request.

use std::net::SocketAddr;

use viewcount_server::config::ServerConfig;
use viewcount_server::router::build_router;
use viewcount_server::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();
    let state = AppState::from_config(&config);

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("view counter server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
