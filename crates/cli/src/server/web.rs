use ferrous_doh_api::{create_doh_routes, AppState};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub async fn start_web_server(bind_addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    info!(
        bind_address = %bind_addr,
        endpoint = format!("http://{}/dns-query", bind_addr),
        "Starting DoH server"
    );

    let app = create_doh_routes(state).layer(TraceLayer::new_for_http());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("DoH server started successfully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
